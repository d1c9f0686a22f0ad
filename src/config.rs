use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::categorize::{Categorizer, CategoryConfig};
use crate::dedup::cluster::DEFAULT_THRESHOLD;
use crate::dedup::vectorize::TextVectorizer;
use crate::pipeline::ArticlePipeline;
use crate::summarize::extractive::DEFAULT_MAX_WORDS;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Everything
/// has a default, so an empty environment gives a working setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cosine similarity at or above which two articles are the same story
    pub similarity_threshold: f64,
    /// JSON category configuration; built-in categories when unset
    pub categories_path: Option<PathBuf>,
    /// Newline-separated stopword list; the English default when unset
    pub stopwords_path: Option<PathBuf>,
    /// Word budget for each article summary
    pub summary_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            categories_path: None,
            stopwords_path: None,
            summary_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DIGEST_SIMILARITY_THRESHOLD") {
            config.similarity_threshold = parse_threshold(&raw)?;
        }

        config.categories_path = lookup("DIGEST_CATEGORIES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        config.stopwords_path = lookup("DIGEST_STOPWORDS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("DIGEST_SUMMARY_WORDS") {
            config.summary_words = raw.trim().parse().with_context(|| {
                format!("DIGEST_SUMMARY_WORDS must be a positive integer, got {raw:?}")
            })?;
            if config.summary_words == 0 {
                anyhow::bail!("DIGEST_SUMMARY_WORDS must be at least 1");
            }
        }

        Ok(config)
    }

    /// The category configuration: from DIGEST_CATEGORIES_PATH or built-in.
    pub fn category_config(&self) -> Result<CategoryConfig> {
        match &self.categories_path {
            Some(path) => CategoryConfig::from_json_file(path),
            None => Ok(CategoryConfig::default()),
        }
    }

    /// The vectorizer: custom stopwords from DIGEST_STOPWORDS_PATH or the default list.
    pub fn vectorizer(&self) -> Result<TextVectorizer> {
        match &self.stopwords_path {
            Some(path) => {
                let text = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read stopword list {}", path.display())
                })?;
                Ok(TextVectorizer::with_stop_words(text.lines()))
            }
            None => Ok(TextVectorizer::default()),
        }
    }

    /// Assemble a pipeline from this configuration.
    pub fn pipeline(&self) -> Result<ArticlePipeline> {
        let categories = self.category_config()?;
        Ok(ArticlePipeline::new(
            self.vectorizer()?,
            Categorizer::new(&categories),
        ))
    }
}

/// Parse a similarity threshold, rejecting anything outside [0, 1].
pub fn parse_threshold(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Similarity threshold must be a number, got {raw:?}"))?;
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("Similarity threshold must be between 0.0 and 1.0, got {value}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.similarity_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.summary_words, DEFAULT_MAX_WORDS);
        assert!(config.categories_path.is_none());
        assert!(config.stopwords_path.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DIGEST_SIMILARITY_THRESHOLD", "0.85"),
            ("DIGEST_SUMMARY_WORDS", "40"),
            ("DIGEST_CATEGORIES_PATH", "/etc/digest/categories.json"),
        ]))
        .unwrap();
        assert_eq!(config.similarity_threshold, 0.85);
        assert_eq!(config.summary_words, 40);
        assert_eq!(
            config.categories_path,
            Some(PathBuf::from("/etc/digest/categories.json"))
        );
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(Config::from_lookup(lookup(&[("DIGEST_SIMILARITY_THRESHOLD", "1.2")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DIGEST_SIMILARITY_THRESHOLD", "high")])).is_err());
    }

    #[test]
    fn rejects_zero_summary_words() {
        assert!(Config::from_lookup(lookup(&[("DIGEST_SUMMARY_WORDS", "0")])).is_err());
    }

    #[test]
    fn missing_category_file_is_an_error() {
        let config = Config {
            categories_path: Some(PathBuf::from("/nonexistent/categories.json")),
            ..Config::default()
        };
        assert!(config.category_config().is_err());
    }
}
