//! Aggregators computing statistics over sets of mood records

mod reasons;
mod stats;

pub use reasons::{
    aggregate_reasons, ReasonSummary, COUNTRY_PHRASE_LIMIT, GLOBAL_PHRASE_LIMIT,
    MIN_REASON_CHARS,
};
pub use stats::{compute_trending, MoodStats, TrendingMood, TRENDING_WINDOW_HOURS};
