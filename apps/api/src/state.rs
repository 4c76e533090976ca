use std::sync::Arc;

use redis::Client as RedisClient;

use crate::config::Config;
use crate::leaderboard::legends::LegendBoard;
use crate::leaderboard::store::ScoreStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Card bodies and the dynamic leaderboard both live in Redis.
    pub redis: RedisClient,
    pub llm: LlmClient,
    pub config: Config,
    /// Legend scores, built once at startup and never mutated.
    pub legends: Arc<LegendBoard>,
    /// Leaderboard store. Redis sorted set in production; the ranker is
    /// tested against the in-memory backend behind the same trait.
    pub scores: Arc<dyn ScoreStore>,
}
