//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates the
//! domain operations for one use case.

pub mod context;
pub mod error;
pub mod migration;
pub mod reasons;
pub mod stats;
pub mod submission;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use migration::MigrationService;
pub use reasons::ReasonService;
pub use stats::StatsService;
pub use submission::SubmissionService;
