//! Domain to DTO mappers
//!
//! Implements `From` conversions between domain values and DTOs.

use mood_core::aggregate::{MoodStats, ReasonSummary, TrendingMood};
use mood_core::entities::{MoodRecord, MoodSubmission, PhraseCount};
use mood_core::value_objects::TimeRange;

use super::requests::SubmitMoodRequest;
use super::responses::{
    MoodResponse, PhraseCountResponse, ReasonsResponse, StatsResponse, TrendingResponse,
};

// ============================================================================
// Submission Mappers
// ============================================================================

impl From<SubmitMoodRequest> for MoodSubmission {
    fn from(request: SubmitMoodRequest) -> Self {
        Self {
            emoji: request.emoji,
            label: request.label,
            timestamp: request.timestamp,
            country: request.country,
            region: request.region,
            latitude: request.latitude,
            longitude: request.longitude,
            reason: request.reason,
            device_id: request.device_id,
        }
    }
}

impl From<&MoodRecord> for MoodResponse {
    fn from(record: &MoodRecord) -> Self {
        Self {
            emoji: record.emoji.clone(),
            label: record.label.clone(),
            timestamp: record.timestamp,
            country: record.country.clone(),
            region: record.region.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            reason: record.reason.clone(),
        }
    }
}

// ============================================================================
// Statistics Mappers
// ============================================================================

impl From<&TrendingMood> for TrendingResponse {
    fn from(trending: &TrendingMood) -> Self {
        Self {
            emoji: trending.emoji.clone(),
            current: trending.current,
            previous: trending.previous,
            delta: trending.delta,
            pct_change: trending.pct_change.filter(|pct| pct.is_finite()),
        }
    }
}

impl From<&PhraseCount> for PhraseCountResponse {
    fn from(phrase: &PhraseCount) -> Self {
        Self {
            phrase: phrase.phrase.clone(),
            count: phrase.count,
        }
    }
}

fn phrase_list(phrases: &[PhraseCount]) -> Vec<PhraseCountResponse> {
    phrases.iter().map(PhraseCountResponse::from).collect()
}

impl StatsResponse {
    pub fn from_stats(stats: MoodStats, range: TimeRange, country: Option<String>) -> Self {
        Self {
            total: stats.total,
            trending: stats.trending.iter().map(TrendingResponse::from).collect(),
            by_country: stats.by_country,
            by_mood: stats.by_mood,
            by_country_mood: stats.by_country_mood,
            by_continent: stats.by_continent,
            by_mood_and_continent: stats.by_mood_and_continent,
            dominant_by_country: stats.dominant_by_country,
            time_range: range.to_string(),
            country,
            error: None,
            debug: None,
        }
    }

    /// Zeroed statistics carrying the read error
    pub fn unavailable(range: TimeRange, country: Option<String>, error: impl Into<String>) -> Self {
        Self {
            time_range: range.to_string(),
            country,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

impl ReasonsResponse {
    pub fn from_summary(summary: &ReasonSummary, range: TimeRange) -> Self {
        Self {
            global: phrase_list(&summary.global),
            by_country: summary
                .by_country
                .iter()
                .map(|(country, phrases)| (country.clone(), phrase_list(phrases)))
                .collect(),
            total: summary.total,
            time_range: range.to_string(),
            error: None,
        }
    }

    /// Empty rankings carrying the read error
    pub fn unavailable(range: TimeRange, error: impl Into<String>) -> Self {
        Self {
            time_range: range.to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}
