//! Reason text handling
//!
//! Sanitizing of free-text reasons on write and rule-based phrase
//! extraction on read.

mod phrases;
mod sanitize;

pub use phrases::{extract_phrases, is_stopword, normalize_text, COMMON_PHRASES};
pub use sanitize::{sanitize_reason, MAX_REASON_CHARS};
