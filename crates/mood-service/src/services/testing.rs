//! In-memory storage doubles shared by the service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mood_cache::DailyRateLimiter;
use mood_core::entities::{MoodRecord, StoredMood};
use mood_core::error::DomainError;
use mood_core::traits::{FallbackStore, MoodQuery, MoodRepository, RepoResult};

use super::context::ServiceContext;

#[derive(Debug, Default)]
pub struct InMemoryMoods {
    pub records: Mutex<Vec<MoodRecord>>,
    pub failing: AtomicBool,
    pub hanging: AtomicBool,
}

impl InMemoryMoods {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    async fn check(&self) -> RepoResult<()> {
        if self.hanging.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MoodRepository for InMemoryMoods {
    async fn insert(&self, record: &MoodRecord) -> RepoResult<()> {
        self.check().await?;
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn insert_many(&self, records: &[MoodRecord]) -> RepoResult<u64> {
        self.check().await?;
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn find(&self, query: &MoodQuery) -> RepoResult<Vec<MoodRecord>> {
        self.check().await?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        self.check().await?;
        Ok(self.len() as i64)
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check().await
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFallback {
    pub entries: Mutex<Vec<StoredMood>>,
    pub failing: AtomicBool,
}

impl InMemoryFallback {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl FallbackStore for InMemoryFallback {
    async fn append(&self, record: &MoodRecord) -> RepoResult<StoredMood> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("read-only file system".to_string()));
        }
        let mut entries = self.entries.lock().unwrap();
        let stored = StoredMood {
            id: format!("fallback-{}", entries.len()),
            record: record.clone(),
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn load_all(&self) -> RepoResult<Vec<MoodRecord>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("read-only file system".to_string()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.record.clone())
            .collect())
    }
}

/// Context over fresh in-memory stores with a limit of 5 and a short timeout
pub fn test_context() -> (ServiceContext, Arc<InMemoryMoods>, Arc<InMemoryFallback>) {
    let moods = Arc::new(InMemoryMoods::default());
    let fallback = Arc::new(InMemoryFallback::default());
    let ctx = ServiceContext::new(
        moods.clone(),
        fallback.clone(),
        DailyRateLimiter::new(5, 24),
        Duration::from_millis(200),
        "memory".to_string(),
    );
    (ctx, moods, fallback)
}
