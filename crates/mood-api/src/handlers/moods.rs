//! Mood submission handler

use axum::{extract::State, Json};
use mood_service::{
    dto::{SubmitMoodRequest, SubmitMoodResponse},
    SubmissionService,
};

use crate::extractors::{ClientAddress, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Record one mood for the calling client
///
/// POST /api/mood
pub async fn submit_mood(
    State(state): State<AppState>,
    client: ClientAddress,
    ValidatedJson(request): ValidatedJson<SubmitMoodRequest>,
) -> ApiResult<Created<Json<SubmitMoodResponse>>> {
    let response = SubmissionService::new(state.service_context())
        .submit(client.as_str(), request)
        .await?;

    Ok(Created(Json(response)))
}
