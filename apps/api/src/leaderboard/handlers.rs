use axum::{
    extract::{Path, Query, State},
    Json,
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::leaderboard::ranker::{self, RankOutcome, Ranked};
use crate::leaderboard::store::LEADERBOARD_KEY;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Serialize)]
pub struct RankResponse {
    /// False when the store is unreachable. Callers drop the ranking
    /// badge instead of treating the card as missing.
    pub available: bool,
    #[serde(flatten)]
    pub ranking: Option<Ranked>,
}

/// GET /api/v1/cards/:id/rank
pub async fn handle_rank(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RankResponse>, AppError> {
    match ranker::get_rank(state.scores.as_ref(), &state.legends, &id.to_string()).await {
        RankOutcome::Ranked(ranking) => Ok(Json(RankResponse {
            available: true,
            ranking: Some(ranking),
        })),
        RankOutcome::NotFound => Err(AppError::NotFound(format!(
            "Card {id} has no leaderboard entry"
        ))),
        RankOutcome::Unavailable => Ok(Json(RankResponse {
            available: false,
            ranking: None,
        })),
    }
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub score: u32,
    /// "card" for a user-generated entry, "legend" for a precomputed one.
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub rows: Vec<LeaderboardRow>,
    /// Size of the full combined field, not just the rows returned.
    pub total_cards: u64,
}

/// GET /api/v1/leaderboard
///
/// Top-N view merging dynamic cards with the legend board. Card names
/// come from the stored bodies; a body that outlived its retention
/// window shows as "Retired Card" while keeping its score row.
pub async fn handle_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let mut conn = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let dynamic: Vec<(String, f64)> = conn
        .zrevrange_withscores(LEADERBOARD_KEY, 0, limit as isize - 1)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let dynamic_total = state
        .scores
        .count()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let mut rows = Vec::with_capacity(limit + state.legends.len());
    for (id, score) in dynamic {
        let name = match db::fetch_card(&mut conn, &id).await {
            Ok(Some(card)) => card.result.archetype,
            _ => "Retired Card".to_string(),
        };
        rows.push(LeaderboardRow {
            name,
            score: score.round() as u32,
            kind: "card",
            card_id: id.parse().ok(),
        });
    }

    rows.extend(state.legends.entries().iter().map(|legend| LeaderboardRow {
        name: legend.name.to_string(),
        score: legend.score,
        kind: "legend",
        card_id: None,
    }));

    // Stable sort: cards precede legends on equal scores, same tie policy
    // as the ranker.
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows.truncate(limit);

    Ok(Json(LeaderboardResponse {
        rows,
        total_cards: dynamic_total + state.legends.len() as u64,
    }))
}
