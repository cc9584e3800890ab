//! Value objects - immutable types that represent domain concepts

mod country;
mod time_range;

pub use country::{continent_for, country_key, normalize_country, UNKNOWN};
pub use time_range::TimeRange;
