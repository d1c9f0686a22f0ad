// Markdown digest rendering.
//
// Produces a self-contained Markdown document that the delivery side can
// send as-is or convert to HTML.

use std::fmt::Write;

use chrono::NaiveDate;

use super::{group_by_category, source_display_name};
use crate::article::CategorizedArticle;
use crate::summarize::digest_overview;

/// Render a ranked digest as Markdown.
pub fn render_digest(articles: &[CategorizedArticle], date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# News Digest: {}", date.format("%B %d, %Y"));
    let _ = writeln!(out);

    if articles.is_empty() {
        let _ = writeln!(out, "No new articles.");
        return out;
    }

    let _ = writeln!(out, "_{}_", digest_overview(articles));

    for (category, members) in group_by_category(articles) {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {category} ({})", members.len());
        let _ = writeln!(out);

        for article in members {
            let title = escape(article.article.title.trim());
            let title = if title.is_empty() {
                "(untitled)".to_string()
            } else {
                title
            };
            if article.article.url.is_empty() {
                let _ = writeln!(out, "- **{title}**");
            } else {
                let _ = writeln!(out, "- [{title}]({})", article.article.url);
            }

            let sources: Vec<&str> = article
                .sources
                .iter()
                .map(|s| source_display_name(s))
                .collect();
            let _ = write!(out, "  - Source: {}", sources.join(", "));
            if article.sources.len() > 1 {
                let _ = write!(out, " ({} newsletters)", article.sources.len());
            }
            let _ = writeln!(out);

            if let Some(summary) = &article.summary {
                let _ = writeln!(out, "  - {}", summary.trim());
            }
        }
    }

    out
}

/// Escape characters that would break a Markdown link label.
fn escape(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
