//! Mood entity - one anonymous mood submission

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::text::sanitize_reason;
use crate::value_objects::{normalize_country, UNKNOWN};

/// Device identifier used when the client does not send one
pub const DEFAULT_DEVICE_ID: &str = "unknown";

/// Raw submission as received from a client, before normalization
#[derive(Debug, Clone, Default)]
pub struct MoodSubmission {
    pub emoji: String,
    pub label: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
    pub device_id: Option<String>,
}

impl MoodSubmission {
    /// Device identifier, falling back to [`DEFAULT_DEVICE_ID`]
    pub fn device_id(&self) -> &str {
        self.device_id
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DEVICE_ID)
    }
}

/// Canonical mood record, immutable once stored
#[derive(Debug, Clone, PartialEq)]
pub struct MoodRecord {
    pub emoji: String,
    pub label: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: Option<String>,
}

impl MoodRecord {
    /// Create a record for `emoji` at `timestamp` with every optional field empty
    pub fn new(emoji: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            emoji: emoji.into(),
            label: None,
            timestamp,
            country: None,
            region: None,
            latitude: None,
            longitude: None,
            reason: None,
        }
    }

    /// Normalize a raw submission into a canonical record.
    ///
    /// `now` is used when the submission carries no timestamp.
    pub fn from_submission(
        submission: MoodSubmission,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let emoji = submission.emoji.trim();
        if emoji.is_empty() {
            return Err(DomainError::InvalidPayload("emoji is required".to_string()));
        }

        Ok(Self {
            emoji: emoji.to_string(),
            label: submission.label.filter(|l| !l.trim().is_empty()),
            timestamp: submission.timestamp.unwrap_or(now),
            country: normalize_country(submission.country.as_deref()),
            region: submission.region.filter(|r| !r.trim().is_empty()),
            latitude: submission.latitude.filter(|v| v.is_finite()),
            longitude: submission.longitude.filter(|v| v.is_finite()),
            reason: sanitize_reason(submission.reason.as_deref()),
        })
    }

    /// Key used for per-mood grouping: emoji, else label, else "Unknown"
    pub fn mood_key(&self) -> &str {
        if !self.emoji.is_empty() {
            &self.emoji
        } else {
            self.label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(UNKNOWN)
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A record as written to the fallback file, with its generated id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMood {
    pub id: String,
    pub record: MoodRecord,
}
