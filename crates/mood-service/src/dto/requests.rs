//! Request DTOs for API endpoints
//!
//! Field names follow the camelCase JSON used by the web client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Mood Requests
// ============================================================================

/// Mood submission body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMoodRequest {
    #[validate(length(min = 1, max = 64, message = "Emoji must be 1-64 characters"))]
    pub emoji: String,

    #[validate(length(max = 64, message = "Label must be at most 64 characters"))]
    pub label: Option<String>,

    /// RFC 3339 timestamp; defaults to the time of receipt
    pub timestamp: Option<DateTime<Utc>>,

    /// ISO-3166 alpha-2 code, any case
    pub country: Option<String>,

    #[validate(length(max = 128, message = "Region must be at most 128 characters"))]
    pub region: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    /// Free text, sanitized and truncated server side
    pub reason: Option<String>,

    #[validate(length(max = 128, message = "Device id must be at most 128 characters"))]
    pub device_id: Option<String>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Filters shared by the statistics endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    /// `day`, `week`, `month` or `all`; anything else means `all`
    pub time_range: Option<String>,
    pub country: Option<String>,
    /// `1` adds a debug section to `/api/stats`
    pub debug: Option<String>,
}

impl StatsParams {
    pub fn debug_enabled(&self) -> bool {
        self.debug.as_deref() == Some("1")
    }
}

/// Query for `GET /api/migrate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MigrateParams {
    pub run: Option<String>,
}

impl MigrateParams {
    pub fn should_run(&self) -> bool {
        self.run.as_deref() == Some("1")
    }
}
