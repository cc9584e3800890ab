//! # mood-cache
//!
//! Volatile, process-local state for the mood service.
//!
//! ## Features
//!
//! - **Daily rate limiting**: per (client address, device) submission counters
//!   that reset at the UTC day boundary
//!
//! Nothing here survives a restart or is shared between instances. Running
//! several replicas behind a load balancer multiplies the effective limit by
//! the replica count.
//!
//! ## Example
//!
//! ```ignore
//! use mood_cache::{DailyRateLimiter, rate_limit_key};
//!
//! let limiter = DailyRateLimiter::new(5, 24);
//! let permit = limiter.try_acquire(&rate_limit_key("203.0.113.7", "device-1"))?;
//! // ... persist the submission ...
//! permit.commit();
//! ```

pub mod rate_limit;

pub use rate_limit::{
    rate_limit_key, DailyRateLimiter, RateLimitEntry, RateLimitExceeded, RateLimitPermit,
};
