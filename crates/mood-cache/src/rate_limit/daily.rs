//! Per-key daily counter with reserve/commit semantics.
//!
//! A slot is reserved under the map entry lock before the submission is
//! persisted, and only counted once the caller commits. Dropping a permit
//! without committing hands the slot back.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use mood_common::RateLimitConfig;

/// Build the composite limiter key for a client
pub fn rate_limit_key(client_addr: &str, device_id: &str) -> String {
    format!("{client_addr}:{device_id}")
}

/// Counter state for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// UTC day the count belongs to
    pub date: NaiveDate,
    /// Committed submissions on `date`
    pub count: u32,
    /// Reserved slots not yet committed or released
    pub in_flight: u32,
}

impl RateLimitEntry {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            in_flight: 0,
        }
    }

    /// Committed count as seen on `today`; a stale day counts as zero
    fn effective_count(&self, today: NaiveDate) -> u32 {
        if self.date == today {
            self.count
        } else {
            0
        }
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if self.date != today {
            self.date = today;
            self.count = 0;
        }
    }
}

/// Rejection returned when a key has used up its daily allowance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded: {current}/{limit} submissions today")]
pub struct RateLimitExceeded {
    pub limit: u32,
    pub current: u32,
    pub retry_after_hours: u32,
}

type EntryMap = DashMap<String, RateLimitEntry>;

/// In-memory daily rate limiter
///
/// Created once at process start and shared through the service context.
#[derive(Debug, Clone)]
pub struct DailyRateLimiter {
    entries: Arc<EntryMap>,
    limit: u32,
    retry_after_hours: u32,
}

impl DailyRateLimiter {
    /// Create a limiter allowing `limit` submissions per key per UTC day
    #[must_use]
    pub fn new(limit: u32, retry_after_hours: u32) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            limit: limit.max(1),
            retry_after_hours,
        }
    }

    /// Configured daily limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Reserve a slot for `key` on the current UTC day
    pub fn try_acquire(&self, key: &str) -> Result<RateLimitPermit, RateLimitExceeded> {
        self.try_acquire_on(key, Utc::now().date_naive())
    }

    /// Reserve a slot for `key` on `today`.
    ///
    /// The check and the reservation happen under the same entry lock, so
    /// concurrent callers for one key can never reserve past the limit. A
    /// rejection leaves the stored state untouched.
    pub fn try_acquire_on(
        &self,
        key: &str,
        today: NaiveDate,
    ) -> Result<RateLimitPermit, RateLimitExceeded> {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry::new(today));

        let current = entry.effective_count(today);
        if current + entry.in_flight >= self.limit {
            tracing::debug!(key = %key, current, limit = self.limit, "Rate limit reached");
            return Err(RateLimitExceeded {
                limit: self.limit,
                current,
                retry_after_hours: self.retry_after_hours,
            });
        }

        entry.roll_over(today);
        entry.in_flight += 1;

        Ok(RateLimitPermit {
            entries: Arc::clone(&self.entries),
            key: key.to_string(),
            date: today,
            settled: false,
        })
    }

    /// Committed count for `key` on the current UTC day
    pub fn current_count(&self, key: &str) -> u32 {
        self.current_count_on(key, Utc::now().date_naive())
    }

    /// Committed count for `key` on `today`
    pub fn current_count_on(&self, key: &str, today: NaiveDate) -> u32 {
        self.entries
            .get(key)
            .map_or(0, |entry| entry.effective_count(today))
    }

    /// Snapshot of the stored entry for `key`
    pub fn entry(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    /// Drop entries from previous days with nothing in flight
    pub fn purge_stale(&self, today: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.date == today || entry.in_flight > 0);
        before.saturating_sub(self.entries.len())
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&RateLimitConfig> for DailyRateLimiter {
    fn from(config: &RateLimitConfig) -> Self {
        Self::new(config.daily_limit, config.retry_after_hours)
    }
}

/// A reserved submission slot
///
/// Call [`RateLimitPermit::commit`] after the submission has been stored.
#[derive(Debug)]
#[must_use = "a permit releases its slot when dropped without commit"]
pub struct RateLimitPermit {
    entries: Arc<EntryMap>,
    key: String,
    date: NaiveDate,
    settled: bool,
}

impl RateLimitPermit {
    /// Count the reserved slot, returning the committed count for the day
    pub fn commit(mut self) -> u32 {
        self.settled = true;
        let Some(mut entry) = self.entries.get_mut(&self.key) else {
            return 0;
        };

        entry.in_flight = entry.in_flight.saturating_sub(1);
        if entry.date < self.date {
            entry.date = self.date;
            entry.count = 0;
        }
        if entry.date == self.date {
            entry.count += 1;
        }
        entry.count
    }

    /// Hand the slot back without counting it
    pub fn release(mut self) {
        self.settle_release();
    }

    fn settle_release(&mut self) {
        if self.settled {
            return;
        }
        self.settled = true;
        if let Some(mut entry) = self.entries.get_mut(&self.key) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
        }
    }
}

impl Drop for RateLimitPermit {
    fn drop(&mut self) {
        self.settle_release();
    }
}
