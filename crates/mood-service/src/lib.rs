//! # mood-service
//!
//! Application layer containing the mood use cases and their DTOs.
//!
//! - [`SubmissionService`]: normalize, rate-limit and persist a submission
//!   (primary store first, fallback file on failure)
//! - [`StatsService`] / [`ReasonService`]: read-side aggregates that degrade
//!   to empty results when the datastore is unavailable
//! - [`MigrationService`]: import the fallback file into an empty primary store

pub mod dto;
pub mod services;

pub use services::{
    MigrationService, ReasonService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, StatsService, SubmissionService,
};
