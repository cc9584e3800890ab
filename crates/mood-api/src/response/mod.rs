//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as `{"error": {"code", "message", "details"}}`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mood_common::{AppError, ErrorResponse};
use mood_core::DomainError;
use mood_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Body missing, not JSON, or not the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::App(AppError::from(err))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::App(AppError::Domain(err))
    }
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
        }
    }

    /// Seconds a rate-limited client should wait, for the `Retry-After` header
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::App(AppError::RateLimitExceeded {
                retry_after_hours, ..
            }) => Some(u64::from(*retry_after_hours) * 3600),
            _ => None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::App(e) => e.details(),
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            Self::InvalidPayload(_) => None,
        }
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let retry_after = self.retry_after_secs();
        let error = match &self {
            Self::App(e) => ErrorResponse::from(e),
            _ => ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let body = ErrorBody { error };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}
