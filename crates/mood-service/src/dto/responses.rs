//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` and use camelCase field names.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Submission Responses
// ============================================================================

/// Where an accepted submission was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistenceSource {
    PrimaryStore,
    FallbackFile,
}

impl PersistenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryStore => "primary-store",
            Self::FallbackFile => "fallback-file",
        }
    }
}

/// Accepted submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitMoodResponse {
    pub ok: bool,
    pub source: PersistenceSource,
}

impl SubmitMoodResponse {
    pub fn stored(source: PersistenceSource) -> Self {
        Self { ok: true, source }
    }
}

/// A stored mood as exposed by debug output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodResponse {
    pub emoji: String,
    pub label: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
}

// ============================================================================
// Statistics Responses
// ============================================================================

/// Per-mood change between the last 24 hours and the 24 hours before
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResponse {
    pub emoji: String,
    pub current: u64,
    pub previous: u64,
    pub delta: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_change: Option<f64>,
}

/// Extra output for `debug=1`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDebug {
    pub countries_present: Vec<String>,
    pub sample_first: Vec<MoodResponse>,
}

/// Aggregate statistics
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: u64,
    pub by_country: BTreeMap<String, u64>,
    pub by_mood: BTreeMap<String, u64>,
    pub by_country_mood: BTreeMap<String, BTreeMap<String, u64>>,
    pub by_continent: BTreeMap<String, u64>,
    pub by_mood_and_continent: BTreeMap<String, BTreeMap<String, u64>>,
    pub dominant_by_country: BTreeMap<String, String>,
    pub trending: Vec<TrendingResponse>,
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Set when the datastore could not be read; every count is then zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "__debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<StatsDebug>,
}

/// One ranked phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseCountResponse {
    pub phrase: String,
    pub count: u64,
}

/// Ranked reason phrases
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonsResponse {
    pub global: Vec<PhraseCountResponse>,
    pub by_country: BTreeMap<String, Vec<PhraseCountResponse>>,
    pub total: usize,
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Migration Responses
// ============================================================================

/// Outcome of a fallback-file import, or its status
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrateResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl MigrateResponse {
    pub fn status(existing: i64) -> Self {
        Self {
            ok: true,
            existing: Some(existing),
            hint: Some("Add ?run=1 to execute migration if table empty".to_string()),
            ..Default::default()
        }
    }

    pub fn inserted(count: u64) -> Self {
        Self {
            ok: true,
            inserted: Some(count),
            ..Default::default()
        }
    }

    pub fn already_populated(existing: i64) -> Self {
        Self {
            ok: false,
            skipped: Some(true),
            reason: Some("Table already has data".to_string()),
            existing: Some(existing),
            ..Default::default()
        }
    }

    pub fn empty_file(file: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some("Local file empty".to_string()),
            file: Some(file.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
