// Summarization: trait-based abstraction for swappable backends.
//
// The Summarizer trait defines the interface. ExtractiveSummarizer is the
// built-in fallback; a model-backed implementation can be dropped in without
// touching the pipeline.

pub mod extractive;
pub mod traits;

use crate::article::CategorizedArticle;

/// Category labels in order of first appearance in a ranked digest.
pub fn categories_in_order(articles: &[CategorizedArticle]) -> Vec<&str> {
    let mut labels: Vec<&str> = Vec::new();
    for article in articles {
        if !labels.contains(&article.category.as_str()) {
            labels.push(&article.category);
        }
    }
    labels
}

/// One-paragraph overview line placed at the top of a digest.
pub fn digest_overview(articles: &[CategorizedArticle]) -> String {
    let labels = categories_in_order(articles);
    let noun = if articles.len() == 1 { "article" } else { "articles" };
    let category_noun = if labels.len() == 1 { "category" } else { "categories" };
    format!(
        "Your news digest contains {} unique {noun} across {} {category_noun}: {}.",
        articles.len(),
        labels.len(),
        labels.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::RawArticle;

    fn entry(category: &str) -> CategorizedArticle {
        CategorizedArticle {
            article: RawArticle::new("s", "", "t", "b"),
            category: category.to_string(),
            duplicate_count: 1,
            sources: vec!["s".to_string()],
            summary: None,
        }
    }

    #[test]
    fn overview_lists_categories_in_first_appearance_order() {
        let digest = vec![entry("Sports"), entry("Politics"), entry("Sports")];
        assert_eq!(
            digest_overview(&digest),
            "Your news digest contains 3 unique articles across 2 categories: Sports, Politics."
        );
    }

    #[test]
    fn overview_singular() {
        assert_eq!(
            digest_overview(&[entry("Other")]),
            "Your news digest contains 1 unique article across 1 category: Other."
        );
    }
}
