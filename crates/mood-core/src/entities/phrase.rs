//! Phrase count - a ranked phrase and its frequency

/// Frequency of one extracted phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: u64,
}

impl PhraseCount {
    /// Create a new PhraseCount
    pub fn new(phrase: impl Into<String>, count: u64) -> Self {
        Self {
            phrase: phrase.into(),
            count,
        }
    }
}
