//! Repository traits (ports)

mod repositories;

pub use repositories::{FallbackStore, MoodQuery, MoodRepository, RepoResult};
