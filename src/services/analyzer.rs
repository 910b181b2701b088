//! Lexical content analysis.
//!
//! Turns raw article text (possibly containing leftover markup) into
//! [`ContentMetrics`]. Deliberately shallow: counts, a mean, and a rolling
//! hash. The analysis is a pure function of the input string.

use regex::Regex;

use crate::models::ContentMetrics;

/// Analyzer with the markup/token regexes compiled once.
pub struct ContentAnalyzer {
    tag: Regex,
    paragraph_tag: Regex,
    whitespace: Regex,
    non_word: Regex,
    blank_lines: Regex,
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(r"<[^>]*>").expect("static regex"),
            paragraph_tag: Regex::new(r"(?i)<p(>|\s[^>]*>)").expect("static regex"),
            whitespace: Regex::new(r"\s+").expect("static regex"),
            non_word: Regex::new(r"\W").expect("static regex"),
            blank_lines: Regex::new(r"\n\s*\n").expect("static regex"),
        }
    }

    /// Analyze raw text into content metrics.
    pub fn analyze(&self, raw_text: &str) -> ContentMetrics {
        let cleaned = self.clean(raw_text);
        let words = self.words(&cleaned);

        let word_count = words.len() as u32;
        let character_count = cleaned.chars().count() as u32;

        let avg_word_length = if words.is_empty() {
            0.0
        } else {
            let total: usize = words.iter().map(|w| w.chars().count()).sum();
            round_one_decimal(total as f64 / words.len() as f64)
        };

        let reading_time_minutes = word_count.div_ceil(200);

        // Empty input yields zero paragraphs; anything non-empty counts at
        // least one.
        let paragraph_count = if cleaned.is_empty() {
            0
        } else {
            self.count_paragraphs(raw_text)
        };

        let content_hash = rolling_hash(&cleaned);

        ContentMetrics {
            word_count,
            character_count,
            avg_word_length,
            reading_time_minutes,
            paragraph_count,
            content_hash,
        }
    }

    /// Strip tags to spaces, decode the six common entities, collapse
    /// whitespace runs, trim.
    fn clean(&self, raw: &str) -> String {
        let stripped = self.tag.replace_all(raw, " ");
        let decoded = stripped
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");
        self.whitespace.replace_all(&decoded, " ").trim().to_string()
    }

    /// Lowercase, split on whitespace, strip non-word characters per token,
    /// drop empties.
    fn words(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .to_lowercase()
            .split_whitespace()
            .map(|token| self.non_word.replace_all(token, "").into_owned())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Count `<p ...>` opening tags when the raw text has them, otherwise
    /// blank-line separated segments, floored at 1.
    fn count_paragraphs(&self, raw: &str) -> u32 {
        let tag_count = self.paragraph_tag.find_iter(raw).count() as u32;
        if tag_count > 0 {
            return tag_count;
        }

        let segments = self
            .blank_lines
            .split(raw)
            .filter(|segment| !segment.trim().is_empty())
            .count() as u32;
        segments.max(1)
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// `h = h*31 + char` over the text, wrapping u32. The sign never goes
/// negative in unsigned arithmetic, so no absolute value is needed.
fn rolling_hash(text: &str) -> u32 {
    text.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
