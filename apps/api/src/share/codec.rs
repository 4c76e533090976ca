//! Card ↔ share-token codec.
//!
//! A token is the card's canonical JSON, UTF-8 encoded, base64'd with the
//! URL-safe alphabet and no padding — safe to drop into a path segment or
//! query string as-is. Decoding is total: anything that is not a valid
//! token comes back as `None`, never a panic or an error.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::models::card::ShareableCard;

/// Encodes a card into a URL-safe token. Contains no `+`, `/` or `=`.
///
/// No length cap is applied here — field sizes are capped upstream by
/// `ShareableCard::from_card`.
pub fn encode(card: &ShareableCard) -> String {
    // Plain structs with string keys cannot fail JSON serialization;
    // the fallback keeps the signature infallible regardless.
    let json = serde_json::to_vec(card).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a token back into a card.
///
/// Invalid alphabet, truncation, malformed UTF-8, and structurally wrong
/// JSON all resolve to `None` — callers treat a foreign token as absent
/// data, not a fatal error. Trailing `=` padding from foreign encoders is
/// tolerated.
pub fn decode(token: &str) -> Option<ShareableCard> {
    let token = token.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardMove;

    fn sample_card() -> ShareableCard {
        ShareableCard {
            score: 88,
            archetype: "The Metrics Mystic 🔮".to_string(),
            emoji: "🔮".to_string(),
            description: "Can forecast anything except their own sprint.".to_string(),
            element: "Dashboards".to_string(),
            stage: "Final Form".to_string(),
            weakness: "Qualitative feedback".to_string(),
            flavor_text: "Última métrica — señal pura.".to_string(),
            moves: vec![
                CardMove {
                    name: "North Star Pivot".to_string(),
                    energy_cost: 2,
                    damage: 60,
                    effect: Some("Redefines success retroactively".to_string()),
                },
                CardMove {
                    name: "A/B Everything".to_string(),
                    energy_cost: 1,
                    damage: 20,
                    effect: None,
                },
            ],
            product_sense: 81,
            execution: 59,
            leadership: 77,
            dream_role: "VP of Vibes".to_string(),
            quote: "The data speaks for itself 📈".to_string(),
            recruiter_reaction: "…we'll be in touch".to_string(),
            roast_bullets: Some(vec!["Believes in funnels the way others believe in fate.".to_string()]),
            grade: Some("A-".to_string()),
            roast_mode: None,
            profile_evaluation: None,
            handle: Some("metrics_mystic".to_string()),
            nickname_plate: None,
        }
    }

    #[test]
    fn test_round_trip_is_exact() {
        let card = sample_card();
        let decoded = decode(&encode(&card)).expect("token must decode");
        assert_eq!(decoded, card);
    }

    #[test]
    fn test_round_trip_survives_multibyte_text() {
        let mut card = sample_card();
        card.archetype = "🧑‍💼 The Sprint Gremlin 👾".to_string();
        card.quote = "日本語のフィードバック only".to_string();
        let decoded = decode(&encode(&card)).expect("token must decode");
        assert_eq!(decoded, card);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&sample_card());
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_empty_token_decodes_to_none() {
        assert_eq!(decode(""), None);
    }

    #[test]
    fn test_garbage_symbols_decode_to_none() {
        assert_eq!(decode("!!!"), None);
    }

    #[test]
    fn test_non_token_word_decodes_to_none() {
        // every char is in the URL-safe alphabet, so base64 decode succeeds
        // and the JSON parse is what must reject it
        assert_eq!(decode("invalid-data"), None);
    }

    #[test]
    fn test_truncated_token_decodes_to_none() {
        let token = encode(&sample_card());
        assert_eq!(decode(&token[..token.len() / 2 + 1]), None);
    }

    #[test]
    fn test_foreign_padding_is_tolerated() {
        let mut token = encode(&sample_card());
        while token.len() % 4 != 0 {
            token.push('=');
        }
        assert_eq!(decode(&token), Some(sample_card()));
    }

    #[test]
    fn test_standard_alphabet_token_is_rejected() {
        // '+' and '/' are not in the URL-safe alphabet
        assert_eq!(decode("ab+/cd"), None);
    }

    #[test]
    fn test_absent_optionals_round_trip_as_absent() {
        let mut card = sample_card();
        card.roast_bullets = None;
        card.grade = None;
        card.handle = None;
        let decoded = decode(&encode(&card)).expect("token must decode");
        assert_eq!(decoded, card);
        assert!(decoded.grade.is_none());
    }
}
