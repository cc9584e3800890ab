//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{MoodRecord, StoredMood};
use crate::error::DomainError;
use crate::value_objects::TimeRange;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Query
// ============================================================================

/// Filter for reading mood records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodQuery {
    /// Inclusive lower bound on the record timestamp
    pub since: Option<DateTime<Utc>>,
    /// Upper-cased country code
    pub country: Option<String>,
}

impl MoodQuery {
    /// Query matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a query from a time range and an optional country filter
    pub fn for_range(range: TimeRange, country: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            since: range.since(now),
            country: country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase),
        }
    }

    #[must_use]
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Check a record against this filter
    pub fn matches(&self, record: &MoodRecord) -> bool {
        if let Some(since) = self.since {
            if record.timestamp < since {
                return false;
            }
        }
        match &self.country {
            Some(country) => record.country.as_deref() == Some(country.as_str()),
            None => true,
        }
    }
}

// ============================================================================
// Mood Repository
// ============================================================================

/// Primary datastore for mood records
#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Insert a single record
    async fn insert(&self, record: &MoodRecord) -> RepoResult<()>;

    /// Insert many records in one batch, returning the number inserted
    async fn insert_many(&self, records: &[MoodRecord]) -> RepoResult<u64>;

    /// Find all records matching the query
    async fn find(&self, query: &MoodQuery) -> RepoResult<Vec<MoodRecord>>;

    /// Count all stored records
    async fn count(&self) -> RepoResult<i64>;

    /// Check that the datastore is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Fallback Store
// ============================================================================

/// Secondary local store used when the primary datastore is unavailable
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Append a record, assigning it a unique id
    async fn append(&self, record: &MoodRecord) -> RepoResult<StoredMood>;

    /// Load every record from the store
    async fn load_all(&self) -> RepoResult<Vec<MoodRecord>>;
}
