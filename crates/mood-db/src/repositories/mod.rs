//! Repository implementations
//!
//! PostgreSQL implementation of the mood repository trait defined in mood-core.

mod error;
mod mood;

pub use mood::PgMoodRepository;
