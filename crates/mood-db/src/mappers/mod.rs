//! Record to model mappers
//!
//! - `From<MoodModel> for MoodRecord`: convert database rows to domain records
//! - [`MoodInsert`]: borrow record data for database insertion

mod mood;

pub use mood::MoodInsert;
