use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::card::ShareableCard;
use crate::share::codec;

/// GET /api/v1/share/:token
///
/// A token that fails to decode is a 404, not a 500 — foreign or
/// corrupted tokens are absent data, not server faults.
pub async fn handle_share(Path(token): Path<String>) -> Result<Json<ShareableCard>, AppError> {
    codec::decode(&token)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Unrecognized share token".to_string()))
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub card: Option<String>,
}

/// Payload the social-preview renderer consumes for its og: tags.
#[derive(Serialize)]
pub struct PreviewPayload {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// GET /api/v1/preview?card=token
///
/// Never errors: a missing or malformed token falls back to the generic
/// site preview so link unfurls always render something.
pub async fn handle_preview(Query(params): Query<PreviewQuery>) -> Json<PreviewPayload> {
    let decoded = params.card.as_deref().and_then(codec::decode);
    Json(match decoded {
        Some(card) => PreviewPayload {
            title: format!("{} {} | {}/100", card.emoji, card.archetype, card.score),
            description: if card.flavor_text.is_empty() {
                card.description
            } else {
                card.flavor_text
            },
            score: Some(card.score),
            emoji: Some(card.emoji),
        },
        None => PreviewPayload {
            title: "PM Roast".to_string(),
            description: "Feed it a resume, get back a trading card you'll pretend not to love."
                .to_string(),
            score: None,
            emoji: None,
        },
    })
}
