use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roast::detect::SourceKind;

/// One attack printed on the card. Wire names (`energyCost`) match the
/// share-token format, so the same struct serves both the stored body
/// and the compact projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    pub name: String,
    #[serde(rename = "energyCost")]
    pub energy_cost: u8,
    pub damage: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

/// Full roast output from the LLM. Field names here are the contract the
/// generation prompt's schema block promises — keep the two in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastResult {
    /// Overall score, 0–100. Clamped after the LLM call, never trusted raw.
    pub score: u8,
    pub archetype: String,
    pub emoji: String,
    pub description: String,
    pub element: String,
    pub stage: String,
    pub weakness: String,
    pub flavor_text: String,
    pub moves: Vec<CardMove>,
    pub product_sense: u8,
    pub execution: u8,
    pub leadership: u8,
    pub dream_role: String,
    pub quote: String,
    pub recruiter_reaction: String,
    #[serde(default)]
    pub roast_bullets: Vec<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub roast_mode: Option<String>,
    #[serde(default)]
    pub profile_evaluation: Option<String>,
}

impl RoastResult {
    /// Clamps every 0–100 field to its range. The LLM occasionally hands
    /// back 110 or a stat above its cap.
    pub fn clamp_scores(&mut self) {
        self.score = self.score.min(100);
        self.product_sense = self.product_sense.min(100);
        self.execution = self.execution.min(100);
        self.leadership = self.leadership.min(100);
    }
}

/// A stored card: the roast result plus identity and provenance.
/// Persisted as JSON in Redis with a retention TTL (see `db::store_card`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastCard {
    pub id: Uuid,
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub result: RoastResult,
    pub created_at: DateTime<Utc>,
}

impl RoastCard {
    pub fn new(source: SourceKind, handle: Option<String>, result: RoastResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            handle,
            result,
            created_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shareable projection
// ────────────────────────────────────────────────────────────────────────────

/// Per-field caps applied when projecting a result into a share token.
/// The codec itself never caps — URL length is controlled here, at the
/// producer (see `share::codec`).
const MAX_ARCHETYPE: usize = 40;
const MAX_EMOJI: usize = 8;
const MAX_DESCRIPTION: usize = 160;
const MAX_ELEMENT: usize = 16;
const MAX_STAGE: usize = 24;
const MAX_WEAKNESS: usize = 60;
const MAX_FLAVOR: usize = 120;
const MAX_MOVE_NAME: usize = 32;
const MAX_MOVE_EFFECT: usize = 80;
const MAX_DREAM_ROLE: usize = 60;
const MAX_QUOTE: usize = 140;
const MAX_REACTION: usize = 140;
const MAX_BULLET: usize = 140;
const MAX_BULLETS: usize = 3;
const MAX_GRADE: usize = 4;
const MAX_ROAST_MODE: usize = 24;
const MAX_EVALUATION: usize = 200;
const MAX_HANDLE: usize = 40;

/// Flattened, short-keyed projection of a roast result, built for minimal
/// URL length. Round-trips losslessly through `share::codec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareableCard {
    #[serde(rename = "s")]
    pub score: u8,
    #[serde(rename = "n")]
    pub archetype: String,
    #[serde(rename = "e")]
    pub emoji: String,
    #[serde(rename = "d")]
    pub description: String,
    #[serde(rename = "el")]
    pub element: String,
    #[serde(rename = "st")]
    pub stage: String,
    #[serde(rename = "w")]
    pub weakness: String,
    #[serde(rename = "f")]
    pub flavor_text: String,
    #[serde(rename = "m")]
    pub moves: Vec<CardMove>,
    #[serde(rename = "ps")]
    pub product_sense: u8,
    #[serde(rename = "ex")]
    pub execution: u8,
    #[serde(rename = "ld")]
    pub leadership: u8,
    #[serde(rename = "dr")]
    pub dream_role: String,
    #[serde(rename = "q")]
    pub quote: String,
    #[serde(rename = "rr")]
    pub recruiter_reaction: String,
    // Extended fields: carried only when present, for richer reconstruction.
    #[serde(rename = "rb", skip_serializing_if = "Option::is_none")]
    pub roast_bullets: Option<Vec<String>>,
    #[serde(rename = "g", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(rename = "rm", skip_serializing_if = "Option::is_none")]
    pub roast_mode: Option<String>,
    #[serde(rename = "pe", skip_serializing_if = "Option::is_none")]
    pub profile_evaluation: Option<String>,
    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(rename = "np", skip_serializing_if = "Option::is_none")]
    pub nickname_plate: Option<String>,
}

impl ShareableCard {
    /// Projects a stored card into its share form, applying the per-field
    /// caps above. Truncation counts chars, not bytes — emoji-safe.
    pub fn from_card(card: &RoastCard) -> Self {
        let r = &card.result;
        Self {
            score: r.score,
            archetype: clip(&r.archetype, MAX_ARCHETYPE),
            emoji: clip(&r.emoji, MAX_EMOJI),
            description: clip(&r.description, MAX_DESCRIPTION),
            element: clip(&r.element, MAX_ELEMENT),
            stage: clip(&r.stage, MAX_STAGE),
            weakness: clip(&r.weakness, MAX_WEAKNESS),
            flavor_text: clip(&r.flavor_text, MAX_FLAVOR),
            moves: r
                .moves
                .iter()
                .map(|m| CardMove {
                    name: clip(&m.name, MAX_MOVE_NAME),
                    energy_cost: m.energy_cost,
                    damage: m.damage,
                    effect: m.effect.as_deref().map(|e| clip(e, MAX_MOVE_EFFECT)),
                })
                .collect(),
            product_sense: r.product_sense,
            execution: r.execution,
            leadership: r.leadership,
            dream_role: clip(&r.dream_role, MAX_DREAM_ROLE),
            quote: clip(&r.quote, MAX_QUOTE),
            recruiter_reaction: clip(&r.recruiter_reaction, MAX_REACTION),
            roast_bullets: if r.roast_bullets.is_empty() {
                None
            } else {
                Some(
                    r.roast_bullets
                        .iter()
                        .take(MAX_BULLETS)
                        .map(|b| clip(b, MAX_BULLET))
                        .collect(),
                )
            },
            grade: r.grade.as_deref().map(|g| clip(g, MAX_GRADE)),
            roast_mode: r.roast_mode.as_deref().map(|m| clip(m, MAX_ROAST_MODE)),
            profile_evaluation: r
                .profile_evaluation
                .as_deref()
                .map(|p| clip(p, MAX_EVALUATION)),
            handle: card.handle.as_deref().map(|h| clip(h, MAX_HANDLE)),
            nickname_plate: None,
        }
    }
}

/// Truncates to at most `max_chars` characters, on char boundaries.
fn clip(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> RoastResult {
        RoastResult {
            score: 73,
            archetype: "The Roadmap Whisperer".to_string(),
            emoji: "🗺️".to_string(),
            description: "Ships decks, not products.".to_string(),
            element: "Synergy".to_string(),
            stage: "Mid Evolution".to_string(),
            weakness: "A direct question".to_string(),
            flavor_text: "Evolves when exposed to headcount.".to_string(),
            moves: vec![
                CardMove {
                    name: "Stakeholder Alignment".to_string(),
                    energy_cost: 3,
                    damage: 40,
                    effect: Some("Opponent skips a sprint".to_string()),
                },
                CardMove {
                    name: "Quick Sync".to_string(),
                    energy_cost: 1,
                    damage: 10,
                    effect: None,
                },
            ],
            product_sense: 61,
            execution: 44,
            leadership: 70,
            dream_role: "CEO of a pre-idea startup".to_string(),
            quote: "Let's take this offline".to_string(),
            recruiter_reaction: "Impressive... deck".to_string(),
            roast_bullets: vec!["Owns the roadmap. The roadmap owns them.".to_string()],
            grade: Some("B-".to_string()),
            roast_mode: Some("spicy".to_string()),
            profile_evaluation: Some("A LinkedIn top voice in training.".to_string()),
        }
    }

    #[test]
    fn test_clip_counts_chars_not_bytes() {
        // 4 emoji = 16 bytes; clipping at 2 chars must not split a code point
        let s = "🔥🔥🔥🔥";
        assert_eq!(clip(s, 2), "🔥🔥");
        assert_eq!(clip("short", 100), "short");
    }

    #[test]
    fn test_projection_applies_field_caps() {
        let mut result = sample_result();
        result.description = "x".repeat(500);
        result.moves[0].name = "y".repeat(100);
        let card = RoastCard::new(SourceKind::Resume, None, result);

        let share = ShareableCard::from_card(&card);
        assert_eq!(share.description.chars().count(), MAX_DESCRIPTION);
        assert_eq!(share.moves[0].name.chars().count(), MAX_MOVE_NAME);
    }

    #[test]
    fn test_projection_caps_bullet_count() {
        let mut result = sample_result();
        result.roast_bullets = (0..10).map(|i| format!("bullet {i}")).collect();
        let card = RoastCard::new(SourceKind::Resume, None, result);

        let share = ShareableCard::from_card(&card);
        assert_eq!(share.roast_bullets.unwrap().len(), MAX_BULLETS);
    }

    #[test]
    fn test_empty_bullets_project_as_absent() {
        let mut result = sample_result();
        result.roast_bullets = vec![];
        let card = RoastCard::new(SourceKind::Resume, None, result);

        assert!(ShareableCard::from_card(&card).roast_bullets.is_none());
    }

    #[test]
    fn test_share_card_uses_short_wire_keys() {
        let card = RoastCard::new(SourceKind::Twitter, Some("pm_guy".to_string()), sample_result());
        let share = ShareableCard::from_card(&card);

        let value = serde_json::to_value(&share).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["s", "n", "e", "d", "el", "st", "w", "f", "m", "ps", "ex", "ld", "dr", "q", "rr", "u"] {
            assert!(obj.contains_key(key), "missing wire key {key}");
        }
        // absent optionals are omitted entirely, not serialized as null
        assert!(!obj.contains_key("np"));
        assert_eq!(obj["m"][0]["energyCost"], 3);
    }

    #[test]
    fn test_move_without_effect_omits_key() {
        let m = CardMove {
            name: "Quick Sync".to_string(),
            energy_cost: 1,
            damage: 10,
            effect: None,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert!(!value.as_object().unwrap().contains_key("effect"));
    }

    #[test]
    fn test_clamp_scores_caps_at_100() {
        let mut result = sample_result();
        result.score = 140;
        result.execution = 101;
        result.clamp_scores();
        assert_eq!(result.score, 100);
        assert_eq!(result.execution, 100);
        assert_eq!(result.product_sense, 61);
    }

    #[test]
    fn test_roast_result_tolerates_missing_extended_fields() {
        // Older stored bodies (and terse LLM replies) lack the extended fields
        let json = serde_json::json!({
            "score": 50,
            "archetype": "The Agile Evangelist",
            "emoji": "📊",
            "description": "d",
            "element": "Velocity",
            "stage": "Basic",
            "weakness": "w",
            "flavor_text": "f",
            "moves": [],
            "product_sense": 1,
            "execution": 2,
            "leadership": 3,
            "dream_role": "dr",
            "quote": "q",
            "recruiter_reaction": "rr"
        });
        let result: RoastResult = serde_json::from_value(json).unwrap();
        assert!(result.roast_bullets.is_empty());
        assert!(result.grade.is_none());
    }
}
