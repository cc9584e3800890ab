//! Geographic and mood statistics

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::entities::MoodRecord;
use crate::value_objects::{continent_for, country_key};

/// Length of each trending comparison window, in hours
pub const TRENDING_WINDOW_HOURS: i64 = 24;

/// Count change for one mood between the last 24h and the 24h before
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingMood {
    pub emoji: String,
    pub current: u64,
    pub previous: u64,
    pub delta: i64,
    /// `delta / previous * 100`; `None` when there is no previous count
    pub pct_change: Option<f64>,
}

impl TrendingMood {
    pub fn new(emoji: impl Into<String>, current: u64, previous: u64) -> Self {
        let delta = current as i64 - previous as i64;
        let pct_change = (previous > 0).then(|| delta as f64 / previous as f64 * 100.0);
        Self {
            emoji: emoji.into(),
            current,
            previous,
            delta,
            pct_change,
        }
    }
}

/// Aggregate counts over a set of mood records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodStats {
    pub total: u64,
    pub by_country: BTreeMap<String, u64>,
    pub by_mood: BTreeMap<String, u64>,
    /// country -> mood -> count
    pub by_country_mood: BTreeMap<String, BTreeMap<String, u64>>,
    pub by_continent: BTreeMap<String, u64>,
    /// continent -> mood -> count
    pub by_mood_and_continent: BTreeMap<String, BTreeMap<String, u64>>,
    /// Most frequent mood per country
    pub dominant_by_country: BTreeMap<String, String>,
    pub trending: Vec<TrendingMood>,
}

impl MoodStats {
    /// Compute counts over `records`. Trending is left empty.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a MoodRecord>,
    {
        let mut stats = Self::default();

        for record in records {
            let country = country_key(record.country.as_deref());
            let continent = continent_for(record.country.as_deref());
            let mood = record.mood_key();

            stats.total += 1;
            *stats.by_country.entry(country.clone()).or_default() += 1;
            *stats.by_mood.entry(mood.to_string()).or_default() += 1;
            *stats.by_continent.entry(continent.to_string()).or_default() += 1;
            *stats
                .by_country_mood
                .entry(country)
                .or_default()
                .entry(mood.to_string())
                .or_default() += 1;
            *stats
                .by_mood_and_continent
                .entry(continent.to_string())
                .or_default()
                .entry(mood.to_string())
                .or_default() += 1;
        }

        stats.dominant_by_country = stats
            .by_country_mood
            .iter()
            .filter_map(|(country, moods)| {
                dominant_mood(moods).map(|mood| (country.clone(), mood.to_string()))
            })
            .collect();

        stats
    }

    #[must_use]
    pub fn with_trending(mut self, trending: Vec<TrendingMood>) -> Self {
        self.trending = trending;
        self
    }
}

/// Highest count wins; ties go to the smallest key
fn dominant_mood(moods: &BTreeMap<String, u64>) -> Option<&str> {
    let mut best: Option<(&str, u64)> = None;
    for (mood, &count) in moods {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

/// Compare per-mood counts in `[now - 24h, now]` against `[now - 48h, now - 24h)`.
///
/// Records outside both windows, including future timestamps, are ignored.
/// Sorted by delta descending, then by emoji.
pub fn compute_trending<'a, I>(records: I, now: DateTime<Utc>) -> Vec<TrendingMood>
where
    I: IntoIterator<Item = &'a MoodRecord>,
{
    let window = Duration::hours(TRENDING_WINDOW_HOURS);
    let current_start = now - window;
    let previous_start = current_start - window;

    let mut counts: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in records {
        let ts = record.timestamp;
        if ts > now || ts < previous_start {
            continue;
        }
        let entry = counts.entry(record.mood_key()).or_default();
        if ts >= current_start {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut trending: Vec<TrendingMood> = counts
        .into_iter()
        .map(|(emoji, (current, previous))| TrendingMood::new(emoji, current, previous))
        .collect();
    trending.sort_by(|a, b| b.delta.cmp(&a.delta).then_with(|| a.emoji.cmp(&b.emoji)));
    trending
}
