// Article data model: what flows into and out of the dedup pipeline.
//
// RawArticle comes from the extraction stage (mailbox + page fetch, which
// live outside this crate). CategorizedArticle is what the digest renderer
// consumes once duplicates have been merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label assigned when no configured category keyword matches.
pub const OTHER_CATEGORY: &str = "Other";

/// An article as extracted from a newsletter link. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Sender or name of the newsletter the link came from
    pub source_newsletter: String,
    /// Article URL (may be empty when the newsletter inlined the story)
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Extracted page text; empty or truncated when the fetch failed
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "default_extraction_succeeded")]
    pub extraction_succeeded: bool,
}

fn default_extraction_succeeded() -> bool {
    true
}

impl RawArticle {
    /// Convenience constructor for a successfully extracted article.
    pub fn new(source: &str, url: &str, title: &str, body: &str) -> Self {
        Self {
            source_newsletter: source.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            body_text: body.to_string(),
            published_at: None,
            extraction_succeeded: true,
        }
    }

    /// The body text, if extraction succeeded and it isn't blank.
    ///
    /// Both vectorization and representative selection treat a failed
    /// extraction the same as an empty body.
    pub fn usable_body(&self) -> Option<&str> {
        if !self.extraction_succeeded {
            return None;
        }
        let body = self.body_text.trim();
        if body.is_empty() {
            None
        } else {
            Some(body)
        }
    }
}

/// One entry of the final digest: a cluster's representative article plus
/// its category and how many raw articles were merged into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedArticle {
    pub article: RawArticle,
    pub category: String,
    /// Number of raw articles in the cluster (1 for a unique story)
    pub duplicate_count: usize,
    /// Distinct newsletters that carried this story, in input order
    pub sources: Vec<String>,
    /// Filled in after the pipeline by whichever summarizer is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
