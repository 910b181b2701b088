use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shallow lexical metrics derived once per input text.
///
/// A pure function of the cleaned text produces this value: two analyses of
/// identical text are always identical. No semantic understanding happens
/// here, only counts and a rolling hash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentMetrics {
    /// Number of word tokens after cleaning.
    pub word_count: u32,
    /// Length of the cleaned text in characters.
    pub character_count: u32,
    /// Mean token length, rounded to one decimal. 0 when there are no words.
    pub avg_word_length: f64,
    /// `ceil(word_count / 200)`, the usual 200-wpm estimate.
    pub reading_time_minutes: u32,
    /// Paragraph count; 0 only for fully empty input.
    pub paragraph_count: u32,
    /// Rolling hash `h = h*31 + char` over the cleaned text, wrapping u32.
    pub content_hash: u32,
}

impl ContentMetrics {
    /// Metrics of the empty input, the fixed point of the analyzer.
    pub fn empty() -> Self {
        Self {
            word_count: 0,
            character_count: 0,
            avg_word_length: 0.0,
            reading_time_minutes: 0,
            paragraph_count: 0,
            content_hash: 0,
        }
    }
}
