//! Roast generation — orchestrates the full card pipeline.
//!
//! Flow: validate → detect source → build prompt → LLM generate →
//! clamp scores → persist card → best-effort leaderboard upsert.
//! A leaderboard failure never fails card creation.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db;
use crate::errors::AppError;
use crate::leaderboard::ranker::{self, RankOutcome, Ranked};
use crate::llm_client::prompts::ROAST_GUARDRAILS;
use crate::llm_client::LlmClient;
use crate::models::card::{RoastCard, RoastResult, ShareableCard};
use crate::roast::detect::{detect_source, extract_handle, SourceKind};
use crate::roast::prompts::{source_angle, ROAST_PROMPT_TEMPLATE, ROAST_SYSTEM, TONE_SPICY};
use crate::roast::validation::validate_submission;
use crate::share::codec;
use crate::state::AppState;

/// Max LLM retries when the result comes back structurally unusable.
const MAX_ROAST_RETRIES: u32 = 2;
/// Submission text sent to the LLM is capped to keep prompts bounded.
const MAX_SUBMISSION_CHARS: usize = 6000;

/// Request body for card generation.
#[derive(Debug, Clone, Deserialize)]
pub struct RoastRequest {
    pub text: String,
}

/// Response from the roast pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct RoastResponse {
    pub card: RoastCard,
    /// Token for the share link and social preview endpoints.
    pub share_token: String,
    /// Absent when the leaderboard store is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Ranked>,
}

/// Runs the full roast pipeline and persists the result.
///
/// Steps:
/// 1. validate_submission() — reject unusable input before the LLM call
/// 2. detect_source() / extract_handle() — pick the roast angle
/// 3. LLM generate (retried if structurally unusable), then clamp scores
/// 4. persist card body with retention TTL
/// 5. leaderboard upsert + rank lookup, best-effort
/// 6. encode the share token from the capped projection
pub async fn generate_roast(
    state: &AppState,
    request: RoastRequest,
) -> Result<RoastResponse, AppError> {
    let check = validate_submission(&request.text);
    if !check.passed {
        return Err(AppError::Validation(
            check
                .reason
                .unwrap_or_else(|| "Submission rejected".to_string()),
        ));
    }

    let source = detect_source(&request.text);
    let handle = extract_handle(&request.text, source);
    info!("Roasting a {source:?} submission");

    let mut result = call_llm_with_retry(&state.llm, &request.text, source).await?;
    result.clamp_scores();

    let card = RoastCard::new(source, handle, result);
    let mut conn = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;
    db::store_card(&mut conn, &card, state.config.card_ttl_secs)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let ranking = rank_new_card(state, &card).await;

    let share_token = codec::encode(&ShareableCard::from_card(&card));

    info!(
        "Generated card {} (score {}) from {source:?} submission",
        card.id, card.result.score
    );

    Ok(RoastResponse {
        card,
        share_token,
        ranking,
    })
}

/// Upserts the new card's score and looks up its combined rank. Any
/// failure degrades to `None`; the card still ships without a badge.
async fn rank_new_card(state: &AppState, card: &RoastCard) -> Option<Ranked> {
    let id = card.id.to_string();
    if let Err(e) = state.scores.upsert(&id, card.result.score as u32).await {
        warn!("Leaderboard upsert skipped for {id}: {e}");
        return None;
    }
    match ranker::get_rank(state.scores.as_ref(), &state.legends, &id).await {
        RankOutcome::Ranked(ranked) => Some(ranked),
        _ => None,
    }
}

/// Calls the LLM for a card. Retries up to MAX_ROAST_RETRIES times when
/// the reply parses but is structurally unusable (no moves, blank
/// archetype).
async fn call_llm_with_retry(
    llm: &LlmClient,
    submission: &str,
    source: SourceKind,
) -> Result<RoastResult, AppError> {
    let prompt = build_roast_prompt(submission, source);

    let mut last_problem = String::new();
    for attempt in 0..=MAX_ROAST_RETRIES {
        let result: RoastResult = llm
            .call_json(&prompt, ROAST_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Roast LLM call failed: {e}")))?;

        match structural_problem(&result) {
            None => return Ok(result),
            Some(problem) => {
                warn!(
                    "Roast attempt {}/{}: {problem}, retrying",
                    attempt + 1,
                    MAX_ROAST_RETRIES + 1
                );
                last_problem = problem;
            }
        }
    }

    Err(AppError::Llm(format!(
        "Roast failed after {} attempts: {last_problem}",
        MAX_ROAST_RETRIES + 1
    )))
}

/// Checks a parsed result for problems serde cannot catch.
fn structural_problem(result: &RoastResult) -> Option<String> {
    if result.archetype.trim().is_empty() {
        return Some("blank archetype".to_string());
    }
    if result.moves.is_empty() {
        return Some("no moves".to_string());
    }
    if result.moves.len() > 6 {
        return Some(format!("{} moves (max 6)", result.moves.len()));
    }
    None
}

/// Builds the roast prompt: tone + guardrails, source angle, capped
/// submission text.
fn build_roast_prompt(submission: &str, source: SourceKind) -> String {
    let submission: String = submission.chars().take(MAX_SUBMISSION_CHARS).collect();
    let tone = format!("{TONE_SPICY}\n\n{ROAST_GUARDRAILS}");
    ROAST_PROMPT_TEMPLATE
        .replace("{tone_instruction}", &tone)
        .replace("{source_angle}", source_angle(source))
        .replace("{submission}", &submission)
}
