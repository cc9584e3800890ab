//! Aggregate read handlers
//!
//! Both endpoints answer 200 even when the datastore is down; the body then
//! carries zeroed aggregates and an `error` string.

use axum::{
    extract::{Query, State},
    Json,
};
use mood_service::{
    dto::{ReasonsResponse, StatsParams, StatsResponse},
    ReasonService, StatsService,
};

use crate::state::AppState;

/// GET /api/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Json<StatsResponse> {
    Json(StatsService::new(state.service_context()).get_stats(&params).await)
}

/// GET /api/stats/reasons
pub async fn get_reasons(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Json<ReasonsResponse> {
    Json(
        ReasonService::new(state.service_context())
            .get_reasons(&params)
            .await,
    )
}
