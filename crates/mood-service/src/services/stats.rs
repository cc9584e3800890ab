//! Statistics service
//!
//! Per-country, per-mood and per-continent counts plus 24h trending.

use chrono::{Duration, Utc};
use mood_core::aggregate::{compute_trending, MoodStats, TRENDING_WINDOW_HOURS};
use mood_core::entities::MoodRecord;
use mood_core::traits::MoodQuery;
use mood_core::value_objects::TimeRange;
use tracing::{instrument, warn};

use crate::dto::{MoodResponse, StatsDebug, StatsParams, StatsResponse};

use super::context::ServiceContext;

/// Records echoed back by `debug=1`
const DEBUG_SAMPLE_SIZE: usize = 3;

/// Statistics service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute statistics for the requested window and country.
    ///
    /// A datastore failure yields zeroed statistics with `error` set.
    #[instrument(skip(self))]
    pub async fn get_stats(&self, params: &StatsParams) -> StatsResponse {
        let range = TimeRange::parse(params.time_range.as_deref());
        let now = Utc::now();
        let query = MoodQuery::for_range(range, params.country.as_deref(), now);

        // Trending always looks at the last 48 hours, so widen the read when
        // the requested window is shorter and filter in memory.
        let trending_start = now - Duration::hours(2 * TRENDING_WINDOW_HOURS);
        let fetch = MoodQuery {
            since: query.since.map(|since| since.min(trending_start)),
            country: query.country.clone(),
        };

        let records = match self.ctx.bounded(self.ctx.mood_repo().find(&fetch)).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Stats read failed, returning empty statistics");
                return StatsResponse::unavailable(range, query.country, e.to_string());
            }
        };

        let in_range: Vec<&MoodRecord> = records.iter().filter(|r| query.matches(r)).collect();
        let stats = MoodStats::from_records(in_range.iter().copied())
            .with_trending(compute_trending(&records, now));

        let debug = params.debug_enabled().then(|| StatsDebug {
            countries_present: stats.by_country.keys().cloned().collect(),
            sample_first: in_range
                .iter()
                .take(DEBUG_SAMPLE_SIZE)
                .map(|r| MoodResponse::from(*r))
                .collect(),
        });

        let mut response = StatsResponse::from_stats(stats, range, query.country);
        response.debug = debug;
        response
    }
}
