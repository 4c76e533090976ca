use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::card::RoastCard;
use crate::roast::generator::{generate_roast, RoastRequest, RoastResponse};
use crate::state::AppState;

/// POST /api/v1/roast
pub async fn handle_roast(
    State(state): State<AppState>,
    Json(req): Json<RoastRequest>,
) -> Result<Json<RoastResponse>, AppError> {
    let response = generate_roast(&state, req).await?;
    Ok(Json(response))
}

/// GET /api/v1/cards/:id
pub async fn handle_get_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoastCard>, AppError> {
    let mut conn = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let card = db::fetch_card(&mut conn, &id.to_string())
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    // expired bodies and unknown ids look the same to the caller
    card.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Card {id} not found")))
}
