//! Reason phrase aggregation
//!
//! Runs the phrase extractor over every record with a usable reason and
//! ranks the resulting phrases globally and per country.

use std::collections::{BTreeMap, HashMap};

use crate::entities::{MoodRecord, PhraseCount};
use crate::text::extract_phrases;
use crate::value_objects::country_key;

/// Maximum phrases in the global ranking
pub const GLOBAL_PHRASE_LIMIT: usize = 100;

/// Maximum phrases in each per-country ranking
pub const COUNTRY_PHRASE_LIMIT: usize = 50;

/// Reasons shorter than this (after trimming) are ignored
pub const MIN_REASON_CHARS: usize = 2;

/// Ranked phrase tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonSummary {
    /// Top phrases across all records
    pub global: Vec<PhraseCount>,
    /// Top phrases keyed by upper-cased country code or "Unknown"
    pub by_country: BTreeMap<String, Vec<PhraseCount>>,
    /// Number of records considered, including those without a reason
    pub total: usize,
}

/// Phrase counter that remembers first-seen order for tie-breaking
#[derive(Debug, Default)]
struct PhraseTally {
    counts: Vec<PhraseCount>,
    index: HashMap<String, usize>,
}

impl PhraseTally {
    fn add(&mut self, phrase: &str) {
        if let Some(&i) = self.index.get(phrase) {
            self.counts[i].count += 1;
        } else {
            self.index.insert(phrase.to_string(), self.counts.len());
            self.counts.push(PhraseCount::new(phrase, 1));
        }
    }

    /// Sort by descending count; the stable sort keeps first-seen order on ties
    fn into_ranked(self, limit: usize) -> Vec<PhraseCount> {
        let mut ranked = self.counts;
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

/// Aggregate extracted phrases over `records`.
///
/// Filtering by time range or country happens before this call.
pub fn aggregate_reasons<'a, I>(records: I) -> ReasonSummary
where
    I: IntoIterator<Item = &'a MoodRecord>,
{
    let mut global = PhraseTally::default();
    let mut by_country: BTreeMap<String, PhraseTally> = BTreeMap::new();
    let mut total = 0;

    for record in records {
        total += 1;

        let Some(reason) = record.reason.as_deref() else {
            continue;
        };
        if reason.trim().chars().count() < MIN_REASON_CHARS {
            continue;
        }

        let phrases = extract_phrases(reason);
        let country_tally = by_country
            .entry(country_key(record.country.as_deref()))
            .or_default();

        for phrase in &phrases {
            global.add(phrase);
            country_tally.add(phrase);
        }
    }

    ReasonSummary {
        global: global.into_ranked(GLOBAL_PHRASE_LIMIT),
        by_country: by_country
            .into_iter()
            .map(|(code, tally)| (code, tally.into_ranked(COUNTRY_PHRASE_LIMIT)))
            .collect(),
        total,
    }
}
