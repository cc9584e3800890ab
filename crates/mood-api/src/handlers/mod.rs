//! Route handlers

pub mod health;
pub mod migrate;
pub mod moods;
pub mod stats;
