//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use mood_service::dto::{HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check against the primary store
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let db_healthy = match ctx.bounded(ctx.mood_repo().ping()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Primary store not reachable");
            false
        }
    };

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
