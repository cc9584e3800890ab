//! Mood record <-> model mapper

use chrono::{DateTime, Utc};
use mood_core::entities::MoodRecord;

use crate::models::MoodModel;

/// Convert MoodModel to MoodRecord
impl From<MoodModel> for MoodRecord {
    fn from(model: MoodModel) -> Self {
        MoodRecord {
            emoji: model.emoji,
            label: model.label,
            timestamp: model.timestamp,
            country: model.country,
            region: model.region,
            latitude: model.latitude,
            longitude: model.longitude,
            reason: model.reason,
        }
    }
}

/// Values bound for a single row insert
pub struct MoodInsert<'a> {
    pub emoji: &'a str,
    pub label: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
    pub country: Option<&'a str>,
    pub region: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<&'a str>,
}

impl<'a> MoodInsert<'a> {
    pub fn new(record: &'a MoodRecord) -> Self {
        Self {
            emoji: &record.emoji,
            label: record.label.as_deref(),
            timestamp: record.timestamp,
            country: record.country.as_deref(),
            region: record.region.as_deref(),
            latitude: record.latitude,
            longitude: record.longitude,
            reason: record.reason.as_deref(),
        }
    }
}
