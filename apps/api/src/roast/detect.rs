//! Input-type detection. The roast angle changes with the source: a
//! LinkedIn profile reads differently from an X feed or a pasted resume.

use serde::{Deserialize, Serialize};

/// Longest handle X allows; anything longer is treated as prose.
const MAX_X_HANDLE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Linkedin,
    Twitter,
    Resume,
}

/// Classifies a submission by cheap textual heuristics. Resume text is
/// the fallback — misclassifying prose as a profile link is worse than
/// the reverse, because links get the "paste your profile text" nudge.
pub fn detect_source(input: &str) -> SourceKind {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.contains("linkedin.com/in/") {
        return SourceKind::Linkedin;
    }
    if lower.contains("twitter.com/") || lower.contains("x.com/") {
        return SourceKind::Twitter;
    }
    // A lone @handle with no surrounding prose reads as an X handle.
    if let Some(handle) = trimmed.strip_prefix('@') {
        if !handle.is_empty()
            && handle.len() <= MAX_X_HANDLE
            && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return SourceKind::Twitter;
        }
    }

    SourceKind::Resume
}

/// Pulls the profile handle out of a link-bearing submission, if any.
/// Resume submissions carry no handle.
pub fn extract_handle(input: &str, kind: SourceKind) -> Option<String> {
    let trimmed = input.trim();
    match kind {
        SourceKind::Linkedin => handle_after(trimmed, "linkedin.com/in/"),
        SourceKind::Twitter => {
            if let Some(handle) = trimmed.strip_prefix('@') {
                if !handle.contains(char::is_whitespace) {
                    return Some(handle.to_string());
                }
            }
            handle_after(trimmed, "x.com/").or_else(|| handle_after(trimmed, "twitter.com/"))
        }
        SourceKind::Resume => None,
    }
}

// ASCII lowering keeps byte offsets valid in the original text.
fn handle_after(text: &str, marker: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find(marker)? + marker.len();
    let handle: String = text[start..]
        .chars()
        .take_while(|&c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        .collect();
    (!handle.is_empty()).then_some(handle)
}
