// Pairwise similarity between vectorized articles.
//
// Cosine similarity over TF-IDF term vectors, with one shortcut: two articles
// whose URLs normalize to the same string are the same article, whatever
// their extracted text says.

use super::vectorize::{TermVector, VectorizedArticle};

/// A scored pair of article indices. Only exists while clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityEdge {
    pub a: usize,
    pub b: usize,
    pub score: f64,
}

/// Cosine similarity between two sparse term vectors.
///
/// Returns 0.0 when either vector has zero magnitude. Clamped to [0, 1].
pub fn cosine_from_weights(a: &TermVector, b: &TermVector) -> f64 {
    // Iterate the smaller map for the dot product
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();

    let mag_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let mag_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Similarity score in [0, 1] between two articles of the same batch.
///
/// Matching normalized URLs force 1.0; otherwise cosine similarity of the
/// term vectors. Symmetric in its arguments.
pub fn score(a: &VectorizedArticle, b: &VectorizedArticle) -> f64 {
    if let (Some(url_a), Some(url_b)) = (&a.normalized_url, &b.normalized_url) {
        if url_a == url_b {
            return 1.0;
        }
    }
    cosine_from_weights(&a.term_vector, &b.term_vector)
}
