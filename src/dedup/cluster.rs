// Near-duplicate clustering with union-find.
//
// Every distinct pair is scored (O(n^2), fine for a few hundred articles per
// digest). Pairs at or above the threshold are unioned, which gives
// single-link clustering: if A~B and B~C then A, B and C share a cluster
// even when A and C look nothing alike. Chained stories over-merge
// occasionally; that trade-off favours catching duplicates over keeping
// clusters tight. Switching to complete-link is a product decision.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::similarity::{self, SimilarityEdge};
use super::vectorize::VectorizedArticle;

/// Default similarity threshold for treating two articles as the same story.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// A group of article indices believed to describe the same story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Member indices into the clustered batch, ascending
    pub members: Vec<usize>,
    /// The member chosen to stand for the whole cluster
    pub representative: usize,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Disjoint-set forest with path halving and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns true if the two sets were separate before the call.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Clamp a caller-supplied threshold into [0, 1]; NaN falls back to the default.
pub fn sanitize_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        warn!(
            default = DEFAULT_THRESHOLD,
            "Similarity threshold is NaN, using default"
        );
        return DEFAULT_THRESHOLD;
    }
    if !(0.0..=1.0).contains(&threshold) {
        warn!(threshold, "Similarity threshold outside [0, 1], clamping");
    }
    threshold.clamp(0.0, 1.0)
}

/// Score every distinct pair and keep the ones that count as duplicates.
///
/// A pair qualifies when its score reaches the threshold and is positive, so
/// a threshold of 0.0 still never merges articles with nothing in common.
pub fn duplicate_edges(vectorized: &[VectorizedArticle], threshold: f64) -> Vec<SimilarityEdge> {
    let mut edges = Vec::new();
    for a in 0..vectorized.len() {
        for b in (a + 1)..vectorized.len() {
            let score = similarity::score(&vectorized[a], &vectorized[b]);
            if score > 0.0 && score >= threshold {
                edges.push(SimilarityEdge { a, b, score });
            }
        }
    }
    edges
}

/// Partition a batch into clusters of near-duplicates.
///
/// Every index appears in exactly one cluster. Clusters are returned in
/// order of their lowest member index.
pub fn cluster(vectorized: &[VectorizedArticle], threshold: f64) -> Vec<Cluster> {
    let threshold = sanitize_threshold(threshold);
    let n = vectorized.len();
    let mut forest = UnionFind::new(n);

    let edges = duplicate_edges(vectorized, threshold);
    for edge in &edges {
        if forest.union(edge.a, edge.b) {
            debug!(
                a = edge.a,
                b = edge.b,
                score = edge.score,
                "Merged near-duplicate articles"
            );
        }
    }

    // Group by root; iterating indices in order keeps members ascending and
    // orders clusters by their first member.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for index in 0..n {
        let root = forest.find(index);
        match slot_of_root[root] {
            Some(slot) => groups[slot].push(index),
            None => {
                slot_of_root[root] = Some(groups.len());
                groups.push(vec![index]);
            }
        }
    }

    groups
        .into_iter()
        .map(|members| {
            let representative = select_representative(vectorized, &members);
            Cluster {
                members,
                representative,
            }
        })
        .collect()
}

/// Pick the canonical member of a cluster.
///
/// Preference order: has a usable body, longest body, earliest publication
/// date (undated ranks after dated), first in input order.
pub fn select_representative(vectorized: &[VectorizedArticle], members: &[usize]) -> usize {
    members
        .iter()
        .copied()
        .min_by(|&x, &y| compare_candidates(vectorized, x, y))
        .unwrap_or_default()
}

/// Ordering where `Less` means "better representative".
fn compare_candidates(vectorized: &[VectorizedArticle], x: usize, y: usize) -> Ordering {
    let ax = &vectorized[x].article;
    let ay = &vectorized[y].article;

    let body_len = |body: Option<&str>| body.map(|b| b.chars().count());
    let (bx, by) = (body_len(ax.usable_body()), body_len(ay.usable_body()));

    by.is_some()
        .cmp(&bx.is_some())
        .then_with(|| by.cmp(&bx))
        .then_with(|| match (ax.published_at, ay.published_at) {
            (Some(dx), Some(dy)) => dx.cmp(&dy),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| x.cmp(&y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::RawArticle;
    use crate::dedup::vectorize::TextVectorizer;
    use chrono::{TimeZone, Utc};

    fn run(articles: Vec<RawArticle>, threshold: f64) -> Vec<Cluster> {
        let vectorized = TextVectorizer::default().vectorize(articles);
        cluster(&vectorized, threshold)
    }

    #[test]
    fn empty_batch_has_no_clusters() {
        assert!(run(vec![], DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn single_article_is_singleton() {
        let clusters = run(
            vec![RawArticle::new("a", "", "Fed raises rates", "")],
            DEFAULT_THRESHOLD,
        );
        assert_eq!(
            clusters,
            vec![Cluster {
                members: vec![0],
                representative: 0
            }]
        );
    }

    #[test]
    fn identical_articles_form_one_cluster() {
        let article = RawArticle::new("a", "", "Fed raises rates", "Central bank moves again");
        let clusters = run(vec![article.clone(), article.clone(), article], 0.9);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn chains_transitively() {
        // 0~1 by URL, 1~2 by text, 0 and 2 have nothing in common
        let a = RawArticle::new("a", "https://x.example.com/one?utm_source=a", "alpha beta", "");
        let b = RawArticle::new("b", "https://x.example.com/one", "gamma delta", "");
        let c = RawArticle::new("c", "", "gamma delta", "");
        let clusters = run(vec![a, b, c], 0.9);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn zero_threshold_does_not_merge_unrelated() {
        let clusters = run(
            vec![
                RawArticle::new("a", "", "Senate budget vote", ""),
                RawArticle::new("b", "", "Championship parade downtown", ""),
                RawArticle::new("c", "", "", ""),
            ],
            0.0,
        );
        assert_eq!(clusters.len(), 3);
    }

    #[test]
    fn out_of_range_thresholds_are_clamped() {
        assert_eq!(sanitize_threshold(1.5), 1.0);
        assert_eq!(sanitize_threshold(-0.2), 0.0);
        assert_eq!(sanitize_threshold(f64::NAN), DEFAULT_THRESHOLD);
        assert_eq!(sanitize_threshold(0.42), 0.42);
    }

    #[test]
    fn representative_prefers_body_then_length() {
        let url = "https://example.com/story";
        let mut no_body = RawArticle::new("a", url, "Story", "");
        no_body.extraction_succeeded = false;
        let short = RawArticle::new("b", url, "Story", "short body");
        let long = RawArticle::new("c", url, "Story", "a considerably longer body text");
        let clusters = run(vec![no_body, short, long], DEFAULT_THRESHOLD);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].representative, 2);
    }

    #[test]
    fn representative_ties_break_on_date_then_order() {
        let url = "https://example.com/story";
        let mut undated = RawArticle::new("a", url, "Story", "same body");
        undated.published_at = None;
        let mut later = RawArticle::new("b", url, "Story", "same body");
        later.published_at = Some(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap());
        let mut earlier = RawArticle::new("c", url, "Story", "same body");
        earlier.published_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        let clusters = run(vec![undated.clone(), later, earlier], DEFAULT_THRESHOLD);
        assert_eq!(clusters[0].representative, 2);

        let clusters = run(vec![undated.clone(), undated], DEFAULT_THRESHOLD);
        assert_eq!(clusters[0].representative, 0);
    }

    #[test]
    fn union_find_merges_sets() {
        let mut forest = UnionFind::new(4);
        assert!(forest.union(0, 1));
        assert!(forest.union(2, 3));
        assert!(!forest.union(1, 0));
        assert!(forest.union(1, 3));
        assert_eq!(forest.find(0), forest.find(2));
    }
}
