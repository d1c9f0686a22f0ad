// TF-IDF vectorization over a per-batch vocabulary.
//
// Each article is one document. Term frequency is normalized by document
// length, and inverse document frequency is ln((n + 1) / df): a term that
// appears in every article of a large batch ends up with a weight close to
// zero, while a term unique to one article stays heavy. The +1 keeps the
// weight of a shared term strictly positive so that two identical articles
// in a two-article batch still have non-zero vectors to compare.
//
// The vocabulary only lives for one call to `vectorize`.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use super::tokenize::{default_stop_words, tokenize};
use crate::article::RawArticle;
use crate::ingest::url::normalize_url;

/// Sparse term → weight map. Ordered so that sums over it are deterministic.
pub type TermVector = BTreeMap<String, f64>;

/// A raw article plus its term vector for this batch.
#[derive(Debug, Clone)]
pub struct VectorizedArticle {
    pub article: RawArticle,
    pub term_vector: TermVector,
    /// Cached `normalize_url(article.url)` for the URL short-circuit
    pub normalized_url: Option<String>,
}

impl VectorizedArticle {
    /// Euclidean norm of the term vector.
    pub fn magnitude(&self) -> f64 {
        self.term_vector.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// True when the article had no usable text at all.
    pub fn is_zero(&self) -> bool {
        self.term_vector.values().all(|w| *w == 0.0)
    }
}

/// Builds term vectors for a batch of articles.
///
/// Holds only the stopword configuration, so one vectorizer can be shared
/// between runs without any vocabulary leaking from one batch to the next.
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    stop_words: HashSet<String>,
}

impl Default for TextVectorizer {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
        }
    }
}

impl TextVectorizer {
    /// Use a custom stopword list instead of the default English one.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// The text an article is vectorized from: title plus body, or the
    /// title alone when extraction failed or the body is blank.
    fn document_text(article: &RawArticle) -> String {
        match article.usable_body() {
            Some(body) => format!("{} {}", article.title, body),
            None => article.title.clone(),
        }
    }

    /// Vectorize a batch. Output has the same length and order as the input.
    pub fn vectorize(&self, articles: Vec<RawArticle>) -> Vec<VectorizedArticle> {
        // Term counts per document, stopwords removed
        let documents: Vec<HashMap<String, usize>> = articles
            .iter()
            .map(|article| {
                let mut counts = HashMap::new();
                for token in tokenize(&Self::document_text(article)) {
                    if !self.stop_words.contains(&token) {
                        *counts.entry(token).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        // Document frequency across the batch
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for counts in &documents {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: HashMap<&str, f64> = document_frequency
            .iter()
            .map(|(term, &df)| (*term, ((n + 1.0) / df as f64).ln()))
            .collect();

        debug!(
            articles = documents.len(),
            vocabulary = idf.len(),
            "Built batch vocabulary"
        );

        let term_vectors: Vec<TermVector> = documents
            .iter()
            .map(|counts| {
                let total: usize = counts.values().sum();
                counts
                    .iter()
                    .map(|(term, &count)| {
                        let tf = count as f64 / total as f64;
                        (term.clone(), tf * idf[term.as_str()])
                    })
                    .collect()
            })
            .collect();

        articles
            .into_iter()
            .zip(term_vectors)
            .map(|(article, term_vector)| VectorizedArticle {
                normalized_url: normalize_url(&article.url),
                article,
                term_vector,
            })
            .collect()
    }
}
