// Keyword-overlap categorization.
//
// Each category owns a keyword list. An article's score for a category is
// the number of times any of its keywords occurs (whole words, or whole
// phrases for multi-word keywords) in the title plus body. A word also
// counts when it is a plain inflection of the keyword ("markets", "voted",
// "companies"), but never when the keyword only appears inside it. The highest score
// wins; ties go to whichever category comes first in the configuration, and
// an article matching nothing lands in "Other".

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::article::{RawArticle, OTHER_CATEGORY};
use crate::dedup::tokenize::tokenize;

/// One category and the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered category configuration. Order is the tie-break order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfig {
    pub categories: Vec<CategoryRule>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let rule = |label: &str, keywords: &[&str]| CategoryRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };

        Self {
            categories: vec![
                rule(
                    "Politics",
                    &[
                        "election", "congress", "senate", "president", "governor", "political",
                        "vote", "campaign", "democrat", "republican",
                    ],
                ),
                rule(
                    "Business & Economy",
                    &[
                        "market", "stock", "economy", "business", "financial", "company",
                        "revenue", "profit", "trade", "economic",
                    ],
                ),
                rule(
                    "Technology",
                    &[
                        "tech", "ai", "software", "app", "digital", "cyber", "computer",
                        "startup", "innovation", "data",
                    ],
                ),
                rule(
                    "Science & Health",
                    &[
                        "study", "research", "health", "medical", "science", "climate",
                        "disease", "vaccine", "treatment", "environment",
                    ],
                ),
                rule(
                    "World News",
                    &[
                        "international", "global", "country", "nation", "foreign", "embassy",
                        "war", "conflict", "treaty",
                    ],
                ),
                rule(
                    "Sports",
                    &[
                        "game", "team", "player", "sport", "championship", "league", "score",
                        "match", "tournament",
                    ],
                ),
                rule(
                    "Culture & Entertainment",
                    &[
                        "film", "movie", "music", "art", "book", "culture", "entertainment",
                        "celebrity", "show", "theater",
                    ],
                ),
            ],
        }
    }
}

impl CategoryConfig {
    /// Load a category configuration from a JSON file:
    /// `[{"label": "Politics", "keywords": ["election", ...]}, ...]`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read category config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid category config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can't categorize anything sensibly.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            anyhow::bail!("Category config has no categories");
        }
        for rule in &self.categories {
            if rule.label.trim().is_empty() {
                anyhow::bail!("Category config has a category with an empty label");
            }
            if rule.label == OTHER_CATEGORY {
                anyhow::bail!("\"{OTHER_CATEGORY}\" is reserved for unmatched articles");
            }
        }
        Ok(())
    }
}

/// Assigns articles to categories. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Categorizer {
    /// (label, keyword phrases as token sequences), in config order
    rules: Vec<(String, Vec<Vec<String>>)>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&CategoryConfig::default())
    }
}

impl Categorizer {
    pub fn new(config: &CategoryConfig) -> Self {
        let rules = config
            .categories
            .iter()
            .map(|rule| {
                let phrases = rule
                    .keywords
                    .iter()
                    .map(|k| tokenize(k))
                    .filter(|phrase| !phrase.is_empty())
                    .collect();
                (rule.label.clone(), phrases)
            })
            .collect();
        Self { rules }
    }

    /// Per-category keyword hit counts, in config order.
    pub fn scores(&self, article: &RawArticle) -> Vec<(&str, usize)> {
        let tokens = tokenize(&format!("{} {}", article.title, article.body_text));
        self.rules
            .iter()
            .map(|(label, phrases)| {
                let hits = phrases
                    .iter()
                    .map(|phrase| count_phrase(&tokens, phrase))
                    .sum();
                (label.as_str(), hits)
            })
            .collect()
    }

    /// The category label for an article, or "Other" if nothing matched.
    pub fn categorize(&self, article: &RawArticle) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (label, hits) in self.scores(article) {
            // Strictly greater: earlier categories keep ties
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((label, hits));
            }
        }
        best.map_or_else(|| OTHER_CATEGORY.to_string(), |(label, _)| label.to_string())
    }
}

/// Count occurrences of a token phrase in a token stream.
fn count_phrase(tokens: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return 0;
    }
    tokens
        .windows(phrase.len())
        .filter(|window| {
            window
                .iter()
                .zip(phrase)
                .all(|(token, keyword)| is_inflection_of(token, keyword))
        })
        .count()
}

/// Endings that turn a keyword into a plural or simple verb form.
const INFLECTIONS: &[&str] = &["s", "es", "ed", "ing"];

/// Whether `token` is `keyword` or one of its regular inflections.
fn is_inflection_of(token: &str, keyword: &str) -> bool {
    if token == keyword {
        return true;
    }
    if let Some(rest) = token.strip_prefix(keyword) {
        if INFLECTIONS.contains(&rest) {
            return true;
        }
        // vote -> voted
        if rest == "d" && keyword.ends_with('e') {
            return true;
        }
    }
    // vote -> voting
    if let Some(stem) = keyword.strip_suffix('e') {
        if token.strip_prefix(stem) == Some("ing") {
            return true;
        }
    }
    // company -> companies
    if let Some(stem) = keyword.strip_suffix('y') {
        if matches!(token.strip_prefix(stem), Some("ies" | "ied")) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, body: &str) -> RawArticle {
        RawArticle::new("s", "", title, body)
    }

    #[test]
    fn picks_highest_scoring_category() {
        let c = Categorizer::default();
        let a = article(
            "Team wins championship",
            "The league final match drew record crowds.",
        );
        assert_eq!(c.categorize(&a), "Sports");
    }

    #[test]
    fn no_match_is_other() {
        let c = Categorizer::default();
        assert_eq!(c.categorize(&article("", "")), OTHER_CATEGORY);
        assert_eq!(c.categorize(&article("Quiet day", "Nothing happened")), OTHER_CATEGORY);
    }

    #[test]
    fn ties_go_to_earlier_category() {
        // One Politics hit, one Sports hit
        let c = Categorizer::default();
        assert_eq!(c.categorize(&article("Senate team", "")), "Politics");
    }

    #[test]
    fn matches_whole_words_only() {
        // "said" must not count as "ai", nor "market" inside "supermarkets"
        let c = Categorizer::default();
        assert_eq!(
            c.categorize(&article("He said supermarkets closed", "")),
            OTHER_CATEGORY
        );
    }

    #[test]
    fn plural_and_inflected_forms_count() {
        let c = Categorizer::default();
        assert_eq!(
            c.categorize(&article("Stocks tumble as markets slide", "")),
            "Business & Economy"
        );
        let a = article("", "Elections loom for companies and players");
        let scores = c.scores(&a);
        assert_eq!(scores[0], ("Politics", 1));
        assert_eq!(scores[1], ("Business & Economy", 1));
        assert_eq!(scores[5], ("Sports", 1));
    }

    #[test]
    fn inflections_do_not_open_substring_matches() {
        assert!(is_inflection_of("voted", "vote"));
        assert!(is_inflection_of("voting", "vote"));
        assert!(is_inflection_of("matches", "match"));
        assert!(!is_inflection_of("aim", "ai"));
        assert!(!is_inflection_of("ward", "war"));
        assert!(!is_inflection_of("artist", "art"));
    }

    #[test]
    fn counts_repeated_occurrences() {
        let c = Categorizer::default();
        let a = article("Election election election", "team");
        let scores = c.scores(&a);
        assert_eq!(scores[0], ("Politics", 3));
        assert_eq!(c.categorize(&a), "Politics");
    }

    #[test]
    fn multi_word_keywords_match_as_phrases() {
        let config = CategoryConfig {
            categories: vec![CategoryRule {
                label: "Monetary Policy".to_string(),
                keywords: vec!["interest rates".to_string()],
            }],
        };
        let c = Categorizer::new(&config);
        assert_eq!(c.categorize(&article("Interest rates rise", "")), "Monetary Policy");
        assert_eq!(c.categorize(&article("Rates of interest", "")), OTHER_CATEGORY);
    }

    #[test]
    fn config_parses_from_json_list() {
        let json = r#"[{"label": "Space", "keywords": ["rocket", "orbit"]}]"#;
        let config: CategoryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_reserved_label() {
        let config = CategoryConfig {
            categories: vec![CategoryRule {
                label: OTHER_CATEGORY.to_string(),
                keywords: vec![],
            }],
        };
        assert!(config.validate().is_err());
    }
}
