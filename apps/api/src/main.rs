mod config;
mod db;
mod errors;
mod leaderboard;
mod llm_client;
mod models;
mod roast;
mod routes;
mod share;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_client;
use crate::leaderboard::legends::LegendBoard;
use crate::leaderboard::store::RedisScoreStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PM Roast API v{}", env!("CARGO_PKG_VERSION"));

    // Redis holds card bodies and the dynamic leaderboard
    let redis = create_client(&config.redis_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build the static legend board from its source datasets
    let legends = Arc::new(LegendBoard::from_static());
    info!("Legend board built: {} entries", legends.len());

    // Leaderboard store over the same Redis client
    let scores = Arc::new(RedisScoreStore::new(redis.clone()));

    // Build app state
    let state = AppState {
        redis,
        llm,
        config: config.clone(),
        legends,
        scores,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
