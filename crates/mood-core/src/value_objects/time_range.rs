//! Time range filter for statistics queries

use std::fmt;

use chrono::{DateTime, Days, NaiveTime, Utc};

/// Time window applied to aggregate queries
///
/// All windows are anchored on midnight UTC and are inclusive of today:
/// `Week` covers today plus the six previous days, `Month` today plus 29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Day,
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Parse a query-string value. Matching is exact; anything else means `All`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("day") => Self::Day,
            Some("week") => Self::Week,
            Some("month") => Self::Month,
            _ => Self::All,
        }
    }

    /// Label used in API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Number of whole days before today included in the window
    fn days_back(self) -> Option<u64> {
        match self {
            Self::Day => Some(0),
            Self::Week => Some(6),
            Self::Month => Some(29),
            Self::All => None,
        }
    }

    /// Inclusive lower bound of the window relative to `now`
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = self.days_back()?;
        let start = now.date_naive().checked_sub_days(Days::new(days))?;
        Some(start.and_time(NaiveTime::MIN).and_utc())
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
