use anyhow::Result;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::info;

use crate::models::card::RoastCard;

/// Creates the Redis client and verifies the server is reachable.
pub async fn create_client(redis_url: &str) -> Result<Client> {
    info!("Connecting to Redis...");

    let client = Client::open(redis_url)?;
    let mut conn = client.get_multiplexed_async_connection().await?;
    redis::cmd("PING").query_async::<_, String>(&mut conn).await?;

    info!("Redis connection established");
    Ok(client)
}

fn card_key(id: &str) -> String {
    format!("card:{id}")
}

/// Persists a card body as JSON under `card:{id}` with the retention TTL.
pub async fn store_card(
    conn: &mut MultiplexedConnection,
    card: &RoastCard,
    ttl_secs: u64,
) -> Result<()> {
    let body = serde_json::to_string(card)?;
    conn.set_ex::<_, _, ()>(card_key(&card.id.to_string()), body, ttl_secs)
        .await?;
    Ok(())
}

/// Fetches a card body. `None` once the retention window has lapsed —
/// callers must not treat that as an infrastructure failure.
pub async fn fetch_card(
    conn: &mut MultiplexedConnection,
    id: &str,
) -> Result<Option<RoastCard>> {
    let raw: Option<String> = conn.get(card_key(id)).await?;
    match raw {
        Some(body) => Ok(Some(serde_json::from_str(&body)?)),
        None => Ok(None),
    }
}
