//! Daily submission rate limiting

mod daily;

pub use daily::{
    rate_limit_key, DailyRateLimiter, RateLimitEntry, RateLimitExceeded, RateLimitPermit,
};
