// Summarizer trait: the swap-ready abstraction.
//
// The digest needs a short blurb per article. Where that blurb comes from
// (an LLM API, a local model, the first few sentences) is behind this trait;
// the dedup pipeline never sees which one is active.

use anyhow::Result;
use async_trait::async_trait;

use crate::article::RawArticle;

/// Trait for summarizing article text. Async because most backends are
/// HTTP APIs.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a block of text.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Summarize an article, falling back to its title when there is no
    /// usable body.
    async fn summarize_article(&self, article: &RawArticle) -> Result<String> {
        match article.usable_body() {
            Some(body) => self.summarize(body).await,
            None if !article.title.trim().is_empty() => Ok(article.title.trim().to_string()),
            None => Ok("No summary available".to_string()),
        }
    }
}
