//! # mood-core
//!
//! Domain layer containing mood entities, value objects, repository traits,
//! reason text analysis, and the statistics aggregators.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod aggregate;
pub mod entities;
pub mod error;
pub mod text;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregate::{
    aggregate_reasons, compute_trending, MoodStats, ReasonSummary, TrendingMood,
    COUNTRY_PHRASE_LIMIT, GLOBAL_PHRASE_LIMIT, TRENDING_WINDOW_HOURS,
};
pub use entities::{MoodRecord, MoodSubmission, PhraseCount, StoredMood};
pub use error::DomainError;
pub use text::{extract_phrases, normalize_text, sanitize_reason, MAX_REASON_CHARS};
pub use traits::{FallbackStore, MoodQuery, MoodRepository, RepoResult};
pub use value_objects::{continent_for, country_key, normalize_country, TimeRange, UNKNOWN};
