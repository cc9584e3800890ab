//! Reason phrase service

use chrono::Utc;
use mood_core::aggregate::aggregate_reasons;
use mood_core::traits::MoodQuery;
use mood_core::value_objects::TimeRange;
use tracing::{instrument, warn};

use crate::dto::{ReasonsResponse, StatsParams};

use super::context::ServiceContext;

/// Reason phrase service
pub struct ReasonService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReasonService<'a> {
    /// Create a new ReasonService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rank extracted reason phrases globally and per country.
    ///
    /// A datastore failure yields empty rankings with `error` set.
    #[instrument(skip(self))]
    pub async fn get_reasons(&self, params: &StatsParams) -> ReasonsResponse {
        let range = TimeRange::parse(params.time_range.as_deref());
        let query = MoodQuery::for_range(range, params.country.as_deref(), Utc::now());

        match self.ctx.bounded(self.ctx.mood_repo().find(&query)).await {
            Ok(records) => ReasonsResponse::from_summary(&aggregate_reasons(&records), range),
            Err(e) => {
                warn!(error = %e, "Reason read failed, returning empty rankings");
                ReasonsResponse::unavailable(range, e.to_string())
            }
        }
    }
}
