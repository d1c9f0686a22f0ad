// Word tokenization shared by the vectorizer and the categorizer.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Tokens shorter than this carry no signal ("a", "s" from "it's", "0").
const MIN_TOKEN_CHARS: usize = 2;

/// Split text into case-folded word tokens.
///
/// Word boundaries are any non-alphanumeric characters, so "0.25%" yields
/// "25" and "Fed's" yields "fed". Stopwords are NOT removed here.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(|t| t.to_lowercase())
        .collect()
}

/// The default stopword set: the `stop-words` crate's English list.
pub fn default_stop_words() -> HashSet<String> {
    get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_folds_case() {
        assert_eq!(
            tokenize("Fed raises interest rates by 0.25%"),
            vec!["fed", "raises", "interest", "rates", "by", "25"]
        );
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  -- . ").is_empty());
    }

    #[test]
    fn default_stop_words_cover_common_words() {
        let stop = default_stop_words();
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        assert!(!stop.contains("championship"));
    }
}
