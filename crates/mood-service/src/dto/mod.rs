//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain values to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{MigrateParams, StatsParams, SubmitMoodRequest};

pub use responses::{
    HealthChecks, HealthResponse, MigrateResponse, MoodResponse, PersistenceSource,
    PhraseCountResponse, ReadinessResponse, ReasonsResponse, StatsDebug, StatsResponse,
    SubmitMoodResponse, TrendingResponse,
};
