//! Mood database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the moods table
#[derive(Debug, Clone, FromRow)]
pub struct MoodModel {
    pub id: i64,
    pub emoji: String,
    pub label: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
}
