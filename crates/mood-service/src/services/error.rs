//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use mood_cache::RateLimitExceeded;
use mood_common::AppError;
use mood_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Daily submission limit reached
    RateLimited(RateLimitExceeded),

    /// Both the primary store and the fallback file failed
    Persistence { primary: String, fallback: String },

    /// Validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::RateLimited(e) => write!(f, "{e}"),
            Self::Persistence { primary, fallback } => write!(
                f,
                "Persistence failed: primary store ({primary}); fallback file ({fallback})"
            ),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::RateLimited(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::RateLimited(_) => 429,
            Self::Validation(_) => 400,
            Self::Persistence { .. } => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::RateLimited(_) => "RATE_LIMIT_EXCEEDED",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<RateLimitExceeded> for ServiceError {
    fn from(err: RateLimitExceeded) -> Self {
        Self::RateLimited(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::RateLimited(e) => AppError::RateLimitExceeded {
                limit: e.limit,
                current: e.current,
                retry_after_hours: e.retry_after_hours,
            },
            ServiceError::Persistence { primary, fallback } => {
                AppError::Persistence { primary, fallback }
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
