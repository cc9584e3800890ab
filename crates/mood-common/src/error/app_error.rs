//! Application error types
//!
//! Unified error handling for the entire application.

use mood_core::DomainError;
use serde::Serialize;
use serde_json::json;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Rate limiting
    #[error("Daily submission limit reached ({current}/{limit})")]
    RateLimitExceeded {
        limit: u32,
        current: u32,
        retry_after_hours: u32,
    },

    // Storage errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Persistence failed: primary store ({primary}); fallback file ({fallback})")]
    Persistence { primary: String, fallback: String },

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 429 Too Many Requests
            Self::RateLimitExceeded { .. } => 429,

            // 500 Internal Server Error
            Self::Database(_) | Self::Persistence { .. } | Self::Config(_) => 500,

            Self::Domain(e) => {
                if e.is_validation() {
                    400
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Machine-readable metadata attached to the error body
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::RateLimitExceeded {
                limit,
                current,
                retry_after_hours,
            } => Some(json!({
                "limit": limit,
                "current": current,
                "retryAfterHours": retry_after_hours,
            })),
            _ => None,
        }
    }
}

/// The `error` object of an API error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}
