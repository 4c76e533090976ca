//! Submission validation. Cheap heuristics that reject unusable input
//! before an LLM call is spent on it.

use serde::Serialize;

const MIN_CHARS: usize = 120;
const MIN_WORDS: usize = 20;
/// Below this share of alphabetic chars the text is symbol soup.
const MIN_LETTER_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionCheck {
    pub passed: bool,
    pub reason: Option<String>,
}

impl SubmissionCheck {
    fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Validates a roast submission.
///
/// FAIL conditions, checked in order:
/// - empty input
/// - links/handles only (a bare profile URL carries nothing to roast)
/// - under `MIN_CHARS` characters or `MIN_WORDS` words
/// - mostly non-alphabetic content
pub fn validate_submission(text: &str) -> SubmissionCheck {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return SubmissionCheck::fail("Submission is empty. Paste a resume or profile text.");
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    if tokens.iter().all(|t| is_link_token(t)) {
        return SubmissionCheck::fail(
            "A link alone isn't roastable. Paste the profile or resume text along with it.",
        );
    }

    if trimmed.chars().count() < MIN_CHARS {
        return SubmissionCheck::fail(format!(
            "Submission too short ({} chars). Give the roast at least {MIN_CHARS} characters to work with.",
            trimmed.chars().count()
        ));
    }

    if tokens.len() < MIN_WORDS {
        return SubmissionCheck::fail(format!(
            "Submission too thin ({} words). {MIN_WORDS}+ words needed for a fair roast.",
            tokens.len()
        ));
    }

    let total = trimmed.chars().filter(|c| !c.is_whitespace()).count();
    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    if total > 0 && (letters as f32 / total as f32) < MIN_LETTER_RATIO {
        return SubmissionCheck::fail(
            "Submission is mostly symbols or numbers. Paste actual resume or profile text.",
        );
    }

    SubmissionCheck::pass()
}

/// A token that is a URL or social handle rather than prose.
fn is_link_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || lower.starts_with('@')
        || lower.contains("linkedin.com/")
        || lower.contains("x.com/")
        || lower.contains("twitter.com/")
}
