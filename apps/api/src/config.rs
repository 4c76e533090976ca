use anyhow::{Context, Result};

/// Default retention window for stored card bodies: 7 days.
const DEFAULT_CARD_TTL_SECS: &str = "604800";

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Retention window for stored card bodies, in seconds. The leaderboard
    /// entry is not expired here — a rank can outlive its card body.
    pub card_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: require_env("REDIS_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            card_ttl_secs: std::env::var("CARD_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_CARD_TTL_SECS.to_string())
                .parse::<u64>()
                .context("CARD_TTL_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
