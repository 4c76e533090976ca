pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::leaderboard;
use crate::roast;
use crate::share;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Roast API
        .route("/api/v1/roast", post(roast::handlers::handle_roast))
        .route("/api/v1/cards/:id", get(roast::handlers::handle_get_card))
        // Leaderboard API
        .route(
            "/api/v1/cards/:id/rank",
            get(leaderboard::handlers::handle_rank),
        )
        .route(
            "/api/v1/leaderboard",
            get(leaderboard::handlers::handle_leaderboard),
        )
        // Share API
        .route("/api/v1/share/:token", get(share::handlers::handle_share))
        .route("/api/v1/preview", get(share::handlers::handle_preview))
        .with_state(state)
}
