// Article pipeline: vectorize → cluster → pick representatives → categorize.
//
// Runs synchronously over one batch. Everything built along the way (the
// vocabulary, term vectors, clusters) is dropped when `process` returns;
// only the ranked CategorizedArticle list escapes. The pipeline value holds
// nothing but immutable configuration, so concurrent digest runs can share
// one without stepping on each other.

use tracing::info;

use super::error::{PipelineError, Result};
use crate::article::{CategorizedArticle, RawArticle};
use crate::categorize::Categorizer;
use crate::dedup::cluster::{self, Cluster};
use crate::dedup::vectorize::TextVectorizer;

/// The dedup + categorize pipeline.
#[derive(Debug, Clone, Default)]
pub struct ArticlePipeline {
    vectorizer: TextVectorizer,
    categorizer: Categorizer,
}

impl ArticlePipeline {
    pub fn new(vectorizer: TextVectorizer, categorizer: Categorizer) -> Self {
        Self {
            vectorizer,
            categorizer,
        }
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Turn a batch of raw articles into a ranked, deduplicated digest list.
    ///
    /// One entry per duplicate cluster, most-reported stories first; ties
    /// keep the input order of their representatives. Fails only on an
    /// empty batch.
    pub fn process(
        &self,
        raw_articles: Vec<RawArticle>,
        similarity_threshold: f64,
    ) -> Result<Vec<CategorizedArticle>> {
        if raw_articles.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }
        let batch_size = raw_articles.len();

        let vectorized = self.vectorizer.vectorize(raw_articles);
        let clusters = cluster::cluster(&vectorized, similarity_threshold);

        // Sources are read before the articles are moved out below
        let sources: Vec<Vec<String>> = clusters
            .iter()
            .map(|c| {
                let mut seen: Vec<String> = Vec::new();
                for &member in &c.members {
                    let source = &vectorized[member].article.source_newsletter;
                    if !seen.contains(source) {
                        seen.push(source.clone());
                    }
                }
                seen
            })
            .collect();

        let mut slots: Vec<Option<RawArticle>> =
            vectorized.into_iter().map(|v| Some(v.article)).collect();

        let mut ranked: Vec<(usize, CategorizedArticle)> = clusters
            .iter()
            .zip(sources)
            .filter_map(|(c, sources)| {
                let article = slots[c.representative].take()?;
                Some((c.representative, self.emit(c, article, sources)))
            })
            .collect();

        // Stable sort: equal counts keep representative input order
        ranked.sort_by_key(|(representative, _)| *representative);
        ranked.sort_by(|(_, a), (_, b)| b.duplicate_count.cmp(&a.duplicate_count));

        info!(
            articles = batch_size,
            clusters = ranked.len(),
            merged = batch_size - ranked.len(),
            threshold = similarity_threshold,
            "Deduplicated article batch"
        );

        Ok(ranked.into_iter().map(|(_, article)| article).collect())
    }

    fn emit(&self, cluster: &Cluster, article: RawArticle, sources: Vec<String>) -> CategorizedArticle {
        CategorizedArticle {
            category: self.categorizer.categorize(&article),
            duplicate_count: cluster.len(),
            sources,
            summary: None,
            article,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::OTHER_CATEGORY;

    #[test]
    fn empty_batch_fails() {
        let pipeline = ArticlePipeline::default();
        assert_eq!(
            pipeline.process(vec![], 0.7).unwrap_err(),
            PipelineError::EmptyBatch
        );
    }

    #[test]
    fn blank_article_is_singleton_other() {
        let pipeline = ArticlePipeline::default();
        let out = pipeline
            .process(vec![RawArticle::new("s", "", "", "")], 0.7)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].duplicate_count, 1);
        assert_eq!(out[0].category, OTHER_CATEGORY);
    }

    #[test]
    fn sources_are_distinct_in_input_order() {
        let url = "https://example.com/story";
        let pipeline = ArticlePipeline::default();
        let out = pipeline
            .process(
                vec![
                    RawArticle::new("Axios", url, "Story", "body"),
                    RawArticle::new("Morning Brew", url, "Story", "body"),
                    RawArticle::new("Axios", url, "Story", "body"),
                ],
                0.7,
            )
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].duplicate_count, 3);
        assert_eq!(out[0].sources, vec!["Axios", "Morning Brew"]);
    }

    #[test]
    fn larger_clusters_rank_first() {
        let pipeline = ArticlePipeline::default();
        let out = pipeline
            .process(
                vec![
                    RawArticle::new("a", "https://example.com/solo", "Solo story", "alone"),
                    RawArticle::new("b", "https://example.com/pair", "Pair story", "one"),
                    RawArticle::new("c", "https://example.com/pair/", "Pair story", "two"),
                ],
                0.7,
            )
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].duplicate_count, 2);
        assert_eq!(out[1].article.source_newsletter, "a");
    }
}
