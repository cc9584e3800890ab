//! Error handling utilities for repositories

use mood_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => DomainError::DatabaseError("connection pool timed out".to_string()),
        other => DomainError::DatabaseError(other.to_string()),
    }
}
