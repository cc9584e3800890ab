//! Rule-based phrase extraction from free-text reasons
//!
//! No statistical model is involved: known multi-word phrases are matched by
//! substring, remaining words are filtered against a stopword list, adjacent
//! long words form bigrams, and whatever is left is emitted as single words.
//! The output must stay stable across releases because clients compare
//! phrase rankings over time.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Curated multi-word phrases matched before tokenizing
pub const COMMON_PHRASES: &[&str] = &[
    "good weather",
    "bad weather",
    "nice day",
    "long day",
    "hard day",
    "great news",
    "bad news",
    "good news",
    "family time",
    "work stress",
    "feeling tired",
    "feeling good",
    "feeling bad",
    "sunny day",
    "rainy day",
    "stressful work",
    "beautiful day",
    "busy day",
    "quiet day",
    "productive day",
    "late night",
    "early morning",
    "quality time",
    "me time",
    "free time",
    "weekend plans",
    "monday blues",
    "friday feeling",
    "tough day",
    "amazing day",
];

/// English and Italian function words
const STOPWORDS: &[&str] = &[
    // English
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "should",
    "could", "can", "may", "might", "must", "i", "me", "my", "mine", "we",
    "our", "ours", "you", "your", "yours", "he", "him", "his", "she", "her",
    "hers", "it", "its", "they", "them", "their", "theirs", "this", "that",
    "these", "those", "am", "for", "of", "to", "in", "on", "at", "by", "with",
    "from", "as", "but", "or", "and", "because", "so", "very", "too", "much",
    "more", "most", "some", "any", "no", "not", "only", "just", "all", "both",
    "each", "every", "few", "many", "such", "who", "what", "where", "when",
    "why", "how", "which",
    // Italian
    "di", "da", "per", "con", "su", "tra", "fra", "il", "lo", "la", "gli",
    "le", "un", "uno", "una", "e", "o", "ma", "se", "come", "anche", "più",
    "molto", "poco", "troppo", "tanto", "così",
];

/// Minimum length (exclusive) for a token to survive filtering
const MIN_TOKEN_LEN: usize = 2;

/// Minimum length (exclusive) of both words in a detected bigram
const MIN_BIGRAM_WORD_LEN: usize = 3;

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("non-alphanumeric pattern is valid"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Check whether a token is a stopword
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Lowercase, replace everything outside `[a-z0-9]` and whitespace with a
/// space, collapse whitespace, trim.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(&replaced, " ");
    collapsed.trim().to_string()
}

/// Extract candidate phrases from one reason, in emission order.
///
/// Known phrases are matched by plain substring containment, so "me time"
/// also matches inside "some time". A word may appear in several bigrams.
pub fn extract_phrases(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);

    let mut results: Vec<String> = COMMON_PHRASES
        .iter()
        .filter(|phrase| normalized.contains(*phrase))
        .map(|phrase| (*phrase).to_string())
        .collect();

    let words: Vec<&str> = normalized
        .split(' ')
        .filter(|w| w.len() > MIN_TOKEN_LEN && !is_stopword(w))
        .collect();

    for pair in words.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.len() <= MIN_BIGRAM_WORD_LEN || second.len() <= MIN_BIGRAM_WORD_LEN {
            continue;
        }
        let bigram = format!("{first} {second}");
        if COMMON_PHRASES.contains(&bigram.as_str()) || results.contains(&bigram) {
            continue;
        }
        results.push(bigram);
    }

    for word in &words {
        if !results.iter().any(|phrase| phrase.contains(word)) {
            results.push((*word).to_string());
        }
    }

    results
}
