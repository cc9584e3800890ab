//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, migrate, moods, stats};
use crate::state::AppState;

/// Create the API router (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/mood", post(moods::submit_mood))
        .route("/stats", get(stats::get_stats))
        .route("/stats/reasons", get(stats::get_reasons))
        .route(
            "/migrate",
            get(migrate::migration_status).post(migrate::run_migration),
        )
}
