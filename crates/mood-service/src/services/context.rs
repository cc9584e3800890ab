//! Service context - dependency container for services
//!
//! Holds the storage backends, the rate limiter and the storage timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mood_cache::DailyRateLimiter;
use mood_core::error::DomainError;
use mood_core::traits::{FallbackStore, MoodRepository, RepoResult};

/// Default upper bound on a single storage call
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
///
/// Created once at startup and cloned into every request. Clones share the
/// same rate limiter state.
#[derive(Clone)]
pub struct ServiceContext {
    mood_repo: Arc<dyn MoodRepository>,
    fallback_store: Arc<dyn FallbackStore>,
    rate_limiter: DailyRateLimiter,
    storage_timeout: Duration,
    fallback_location: String,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        mood_repo: Arc<dyn MoodRepository>,
        fallback_store: Arc<dyn FallbackStore>,
        rate_limiter: DailyRateLimiter,
        storage_timeout: Duration,
        fallback_location: String,
    ) -> Self {
        Self {
            mood_repo,
            fallback_store,
            rate_limiter,
            storage_timeout,
            fallback_location,
        }
    }

    /// Get the primary mood repository
    pub fn mood_repo(&self) -> &dyn MoodRepository {
        self.mood_repo.as_ref()
    }

    /// Get the fallback store
    pub fn fallback_store(&self) -> &dyn FallbackStore {
        self.fallback_store.as_ref()
    }

    /// Get the daily submission rate limiter
    pub fn rate_limiter(&self) -> &DailyRateLimiter {
        &self.rate_limiter
    }

    pub fn storage_timeout(&self) -> Duration {
        self.storage_timeout
    }

    /// Human-readable location of the fallback store
    pub fn fallback_location(&self) -> &str {
        &self.fallback_location
    }

    /// Run a storage call under the configured timeout
    pub async fn bounded<T, F>(&self, call: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout(self.storage_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Timeout(self.storage_timeout.as_millis() as u64)),
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("mood_repo", &"MoodRepository")
            .field("fallback_store", &self.fallback_location)
            .field("rate_limiter", &self.rate_limiter)
            .field("storage_timeout", &self.storage_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    mood_repo: Option<Arc<dyn MoodRepository>>,
    fallback_store: Option<Arc<dyn FallbackStore>>,
    rate_limiter: Option<DailyRateLimiter>,
    storage_timeout: Duration,
    fallback_location: String,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            mood_repo: None,
            fallback_store: None,
            rate_limiter: None,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
            fallback_location: String::from("fallback store"),
        }
    }

    pub fn mood_repo(mut self, repo: Arc<dyn MoodRepository>) -> Self {
        self.mood_repo = Some(repo);
        self
    }

    pub fn fallback_store(mut self, store: Arc<dyn FallbackStore>) -> Self {
        self.fallback_store = Some(store);
        self
    }

    pub fn rate_limiter(mut self, limiter: DailyRateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    pub fn fallback_location(mut self, location: impl Into<String>) -> Self {
        self.fallback_location = location.into();
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a storage backend is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.mood_repo
                .ok_or_else(|| ServiceError::validation("mood_repo is required"))?,
            self.fallback_store
                .ok_or_else(|| ServiceError::validation("fallback_store is required"))?,
            self.rate_limiter
                .unwrap_or_else(|| DailyRateLimiter::from(&mood_common::RateLimitConfig::default())),
            self.storage_timeout,
            self.fallback_location,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
