// Colored terminal output for digests and category configuration.

use colored::Colorize;

use super::{group_by_category, source_display_name, truncate_chars};
use crate::article::CategorizedArticle;
use crate::categorize::CategoryConfig;
use crate::summarize::digest_overview;

/// Display a ranked, categorized digest in the terminal.
pub fn display_digest(articles: &[CategorizedArticle]) {
    if articles.is_empty() {
        println!("No new articles.");
        return;
    }

    println!(
        "\n{}",
        format!("=== News Digest ({} stories) ===", articles.len()).bold()
    );
    println!("{}", digest_overview(articles).dimmed());

    for (category, members) in group_by_category(articles) {
        println!(
            "\n  {}",
            format!("{category} ({})", members.len()).bright_blue().bold()
        );
        println!("  {}", "-".repeat(60).dimmed());

        for article in members {
            let title = if article.article.title.trim().is_empty() {
                "(untitled)".to_string()
            } else {
                truncate_chars(&article.article.title, 80)
            };

            let reach = if article.duplicate_count > 1 {
                format!(" x{}", article.duplicate_count)
                    .bright_yellow()
                    .to_string()
            } else {
                String::new()
            };

            println!("  • {}{}", title.bold(), reach);
            if !article.article.url.is_empty() {
                println!("    {}", article.article.url.underline());
            }

            let sources: Vec<&str> = article
                .sources
                .iter()
                .map(|s| source_display_name(s))
                .collect();
            println!("    {} {}", "via".dimmed(), sources.join(", ").dimmed());

            if let Some(summary) = &article.summary {
                println!("    {}", truncate_chars(summary, 300));
            }
        }
    }
    println!();
}

/// Display the active category configuration.
pub fn display_categories(config: &CategoryConfig) {
    println!("\n{}", "=== Categories (tie-break order) ===".bold());
    for (i, rule) in config.categories.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, rule.label.bold());
        println!("      Keywords: {}", rule.keywords.join(", ").dimmed());
    }
    println!(
        "\n  Articles matching no keyword are filed under {}.",
        crate::article::OTHER_CATEGORY.bold()
    );
}
