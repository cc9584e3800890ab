//! Submission service
//!
//! Normalizes a mood submission, applies the daily rate limit and persists
//! it: primary store first, fallback file when the primary store fails.

use chrono::Utc;
use mood_cache::rate_limit_key;
use mood_core::entities::{MoodRecord, MoodSubmission};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{PersistenceSource, SubmitMoodRequest, SubmitMoodResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Submission service
pub struct SubmissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubmissionService<'a> {
    /// Create a new SubmissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Accept a submission from `client_addr`
    ///
    /// The rate limit slot is reserved before persisting and only counted
    /// once the record is stored somewhere; a double storage failure leaves
    /// the count unchanged.
    #[instrument(skip(self, request), fields(client = %client_addr))]
    pub async fn submit(
        &self,
        client_addr: &str,
        request: SubmitMoodRequest,
    ) -> ServiceResult<SubmitMoodResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let submission = MoodSubmission::from(request);
        let key = rate_limit_key(client_addr, submission.device_id());
        let record = MoodRecord::from_submission(submission, Utc::now())?;

        let permit = self.ctx.rate_limiter().try_acquire(&key).map_err(|e| {
            info!(key = %key, current = e.current, limit = e.limit, "Submission rate limited");
            ServiceError::from(e)
        })?;

        let source = self.persist(&record).await?;
        let used = permit.commit();

        info!(
            emoji = %record.emoji,
            country = record.country.as_deref().unwrap_or("-"),
            source = source.as_str(),
            used,
            "Mood submission stored"
        );

        Ok(SubmitMoodResponse::stored(source))
    }

    /// Two-stage write: primary store, then the fallback file on failure
    async fn persist(&self, record: &MoodRecord) -> ServiceResult<PersistenceSource> {
        let primary_err = match self.ctx.bounded(self.ctx.mood_repo().insert(record)).await {
            Ok(()) => return Ok(PersistenceSource::PrimaryStore),
            Err(e) => e,
        };
        warn!(error = %primary_err, "Primary store insert failed, using fallback file");

        match self
            .ctx
            .bounded(self.ctx.fallback_store().append(record))
            .await
        {
            Ok(stored) => {
                info!(id = %stored.id, "Mood written to fallback file");
                Ok(PersistenceSource::FallbackFile)
            }
            Err(fallback_err) => {
                error!(
                    primary = %primary_err,
                    fallback = %fallback_err,
                    "Mood submission could not be stored"
                );
                Err(ServiceError::Persistence {
                    primary: primary_err.to_string(),
                    fallback: fallback_err.to_string(),
                })
            }
        }
    }
}
