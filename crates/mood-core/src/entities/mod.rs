//! Domain entities - core business objects

mod mood;
mod phrase;

pub use mood::{MoodRecord, MoodSubmission, StoredMood, DEFAULT_DEVICE_ID};
pub use phrase::PhraseCount;
