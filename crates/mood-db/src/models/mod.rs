//! Database models - SQLx-compatible structs for PostgreSQL tables

mod mood;

pub use mood::MoodModel;
