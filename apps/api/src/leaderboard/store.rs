//! Score store — the narrow capability surface the ranker needs from the
//! externally-owned sorted store: {upsert, score_of, rank_of, count}.
//!
//! Default backend is a Redis sorted set. `InMemoryScoreStore` implements
//! the same four operations for tests and Redis-less local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;

/// Sorted-set key holding dynamic card scores, keyed by card id.
pub(crate) const LEADERBOARD_KEY: &str = "leaderboard:cards";

/// A store operation failed at the infrastructure level. The ranker maps
/// this to its `Unavailable` outcome; it is never conflated with a
/// missing entry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// The four operations the ranker consumes. A single upsert or lookup is
/// atomic in the backing store; no additional locking here.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Idempotent upsert keyed by card id. Re-inserting an id overwrites
    /// its score, never duplicates the entry.
    async fn upsert(&self, card_id: &str, score: u32) -> Result<(), StoreError>;

    async fn score_of(&self, card_id: &str) -> Result<Option<u32>, StoreError>;

    /// 0-indexed rank among dynamic entries, descending (0 = highest
    /// score). Ordering between equal scores is the backend's native
    /// order; no extra tie-break is imposed.
    async fn rank_of(&self, card_id: &str) -> Result<Option<u64>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

/// Sorted-set backend: ZADD / ZSCORE / ZREVRANK / ZCARD on one key.
pub struct RedisScoreStore {
    client: redis::Client,
}

impl RedisScoreStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl ScoreStore for RedisScoreStore {
    async fn upsert(&self, card_id: &str, score: u32) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.zadd::<_, _, _, ()>(LEADERBOARD_KEY, card_id, score)
            .await?;
        Ok(())
    }

    async fn score_of(&self, card_id: &str) -> Result<Option<u32>, StoreError> {
        let mut conn = self.conn().await?;
        let score: Option<f64> = conn.zscore(LEADERBOARD_KEY, card_id).await?;
        Ok(score.map(|s| s.round() as u32))
    }

    async fn rank_of(&self, card_id: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.conn().await?;
        let rank: Option<u64> = conn.zrevrank(LEADERBOARD_KEY, card_id).await?;
        Ok(rank)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.conn().await?;
        Ok(conn.zcard(LEADERBOARD_KEY).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

/// HashMap-backed store. Ties order by card id descending, mirroring a
/// sorted set's member ordering under ZREVRANK.
#[allow(dead_code)] // constructed by tests and Redis-less local runs only
#[derive(Default)]
pub struct InMemoryScoreStore {
    entries: Mutex<HashMap<String, u32>>,
}

#[allow(dead_code)] // constructed by tests and Redis-less local runs only
impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ranked_ids(entries: &HashMap<String, u32>) -> Vec<(String, u32)> {
        let mut rows: Vec<(String, u32)> = entries
            .iter()
            .map(|(id, score)| (id.clone(), *score))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        rows
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn upsert(&self, card_id: &str, score: u32) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(card_id.to_string(), score);
        Ok(())
    }

    async fn score_of(&self, card_id: &str) -> Result<Option<u32>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(card_id).copied())
    }

    async fn rank_of(&self, card_id: &str) -> Result<Option<u64>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(Self::ranked_ids(&entries)
            .iter()
            .position(|(id, _)| id == card_id)
            .map(|i| i as u64))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.len() as u64)
    }
}
