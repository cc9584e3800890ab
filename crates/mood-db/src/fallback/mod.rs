//! Local fallback storage

mod json_file;

pub use json_file::{FileMood, JsonFileStore};
