//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage timed out after {0} ms")]
    Timeout(u64),

    #[error("Fallback storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::Timeout(_) => "STORAGE_TIMEOUT",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPayload(_) | Self::ValidationError(_))
    }
}
