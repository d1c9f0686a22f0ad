// Extractive summarizer: leading sentences up to a word budget.
//
// Used when no model-backed summarizer is configured. News articles put the
// key facts first, so the opening sentences make a passable summary.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::Summarizer;

/// Default word budget per article summary.
pub const DEFAULT_MAX_WORDS: usize = 80;

pub struct ExtractiveSummarizer {
    pub max_words: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl ExtractiveSummarizer {
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Keep whole leading sentences while they fit in the word budget.
    /// If even the first sentence is too long, cut to `max_words` words.
    pub fn extract(&self, text: &str) -> String {
        let flattened = text.replace(|c: char| c == '\r' || c == '\n', " ");
        let mut kept: Vec<&str> = Vec::new();
        let mut word_count = 0;

        for sentence in flattened.split(". ") {
            let sentence = sentence.trim().trim_end_matches('.');
            if sentence.is_empty() {
                continue;
            }
            let words = sentence.split_whitespace().count();
            if word_count + words > self.max_words {
                break;
            }
            kept.push(sentence);
            word_count += words;
        }

        if kept.is_empty() {
            let words: Vec<&str> = flattened.split_whitespace().take(self.max_words).collect();
            if words.is_empty() {
                return String::new();
            }
            return format!("{}...", words.join(" "));
        }

        kept.iter()
            .map(|s| {
                if s.ends_with(|c: char| matches!(c, '!' | '?' | '"' | '\'')) {
                    s.to_string()
                } else {
                    format!("{s}.")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        Ok(self.extract(text))
    }
}
