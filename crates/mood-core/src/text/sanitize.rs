//! Reason sanitizing applied before a record is stored

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum stored reason length, in characters
pub const MAX_REASON_CHARS: usize = 30;

static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t]+").expect("line break pattern is valid"));

static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Sanitize a raw reason.
///
/// Truncation happens before cleaning, so a reason cut mid-word keeps its
/// partial trailing token.
pub fn sanitize_reason(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let truncated: String = trimmed.chars().take(MAX_REASON_CHARS).collect();
    let spaced = LINE_BREAKS.replace_all(&truncated, " ");
    let printable: String = spaced.chars().filter(|c| !c.is_control()).collect();
    let collapsed = WHITESPACE_RUNS.replace_all(&printable, " ");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
