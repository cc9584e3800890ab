//! # mood-db
//!
//! Storage layer implementing the `mood-core` storage traits.
//!
//! ## Overview
//!
//! - Connection pool management for PostgreSQL via SQLx
//! - The `moods` table model and record mappers
//! - [`PgMoodRepository`], the primary datastore
//! - [`JsonFileStore`], the append-only fallback file used when the primary
//!   datastore cannot be reached
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mood_db::{create_pool, JsonFileStore, PgMoodRepository, PoolConfig};
//! use mood_core::traits::MoodRepository;
//!
//! async fn example(config: &mood_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(&config.database))?;
//!     let moods = PgMoodRepository::new(pool);
//!     let fallback = JsonFileStore::new(&config.storage.fallback_file);
//!     println!("{} moods stored", moods.count().await?);
//!     Ok(())
//! }
//! ```

pub mod fallback;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use fallback::JsonFileStore;
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::PgMoodRepository;
