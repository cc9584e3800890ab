//! Fallback file import handlers

use axum::{
    extract::{Query, State},
    Json,
};
use mood_service::{
    dto::{MigrateParams, MigrateResponse},
    MigrationService,
};

use crate::response::ApiResult;
use crate::state::AppState;

/// Report the primary store row count, or import when `?run=1`
///
/// GET /api/migrate
pub async fn migration_status(
    State(state): State<AppState>,
    Query(params): Query<MigrateParams>,
) -> ApiResult<Json<MigrateResponse>> {
    let service = MigrationService::new(state.service_context());
    let response = if params.should_run() {
        service.run().await?
    } else {
        service.status().await?
    };
    Ok(Json(response))
}

/// Import the fallback file into an empty primary store
///
/// POST /api/migrate
pub async fn run_migration(State(state): State<AppState>) -> ApiResult<Json<MigrateResponse>> {
    let response = MigrationService::new(state.service_context()).run().await?;
    Ok(Json(response))
}
