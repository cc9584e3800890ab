//! Test fixtures and data generators

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mood_core::{DomainError, MoodQuery, MoodRecord, MoodRepository, RepoResult};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Device id no other test uses
pub fn unique_device() -> String {
    format!("device-{}-{}", unique_suffix(), uuid::Uuid::new_v4().simple())
}

// ============================================================================
// Storage
// ============================================================================

/// Primary store held in memory, switchable into a failing state
#[derive(Debug, Default)]
pub struct MemoryMoodRepository {
    records: Mutex<Vec<MoodRecord>>,
    failing: AtomicBool,
}

impl MemoryMoodRepository {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<MoodRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn seed(&self, records: impl IntoIterator<Item = MoodRecord>) {
        if let Ok(mut stored) = self.records.lock() {
            stored.extend(records);
        }
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> RepoResult<std::sync::MutexGuard<'_, Vec<MoodRecord>>> {
        self.records
            .lock()
            .map_err(|e| DomainError::InternalError(e.to_string()))
    }
}

#[async_trait]
impl MoodRepository for MemoryMoodRepository {
    async fn insert(&self, record: &MoodRecord) -> RepoResult<()> {
        self.check()?;
        self.lock()?.push(record.clone());
        Ok(())
    }

    async fn insert_many(&self, records: &[MoodRecord]) -> RepoResult<u64> {
        self.check()?;
        self.lock()?.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn find(&self, query: &MoodQuery) -> RepoResult<Vec<MoodRecord>> {
        self.check()?;
        Ok(self
            .lock()?
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        self.check()?;
        Ok(self.lock()?.len() as i64)
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check()
    }
}

/// Scratch directory removed on drop
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("mood-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Mood submission body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodBody {
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub device_id: String,
}

impl MoodBody {
    pub fn new(emoji: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            label: None,
            timestamp: None,
            country: None,
            reason: None,
            device_id: unique_device(),
        }
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn device(mut self, device_id: &str) -> Self {
        self.device_id = device_id.to_string();
        self
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
