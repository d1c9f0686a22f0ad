// Output formatting: terminal display and Markdown digest generation.

pub mod markdown;
pub mod terminal;

use crate::article::CategorizedArticle;
use crate::summarize::categories_in_order;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Group a ranked digest by category, keeping rank order inside each group
/// and ordering groups by where their first article ranks.
pub fn group_by_category(articles: &[CategorizedArticle]) -> Vec<(&str, Vec<&CategorizedArticle>)> {
    categories_in_order(articles)
        .into_iter()
        .map(|label| {
            let members = articles.iter().filter(|a| a.category == label).collect();
            (label, members)
        })
        .collect()
}

/// Sender display name: "Axios AM <am@axios.com>" becomes "Axios AM".
pub fn source_display_name(sender: &str) -> &str {
    match sender.split_once('<') {
        Some((name, _)) if !name.trim().is_empty() => name.trim(),
        _ => sender.trim(),
    }
}
