use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use digestify::article::{CategorizedArticle, RawArticle};
use digestify::config::{parse_threshold, Config};
use digestify::ingest::{links, newsletter};
use digestify::output::{markdown, terminal};
use digestify::pipeline::PipelineError;
use digestify::summarize::extractive::ExtractiveSummarizer;
use digestify::summarize::traits::Summarizer;

/// Digestify: one deduplicated digest from many newsletters.
///
/// Merges articles that several newsletters link to, files each story under
/// a topic, and prints the result most-reported first.
#[derive(Parser)]
#[command(name = "digestify", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a digest from a JSON file of extracted articles
    Digest {
        /// JSON array of articles (source_newsletter, url, title, body_text, ...)
        input: PathBuf,

        /// Similarity threshold for merging duplicates (default from DIGEST_SIMILARITY_THRESHOLD, else 0.7)
        #[arg(long)]
        threshold: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Add an extractive summary to each story
        #[arg(long)]
        summaries: bool,

        /// Keep failed extractions and navigation/legal pages
        #[arg(long)]
        keep_junk: bool,
    },

    /// Print the article links found in a newsletter body (text or HTML)
    Links {
        /// Newsletter body file
        input: PathBuf,

        /// Sender of the email, used to check it is a newsletter
        #[arg(long, default_value = "")]
        sender: String,

        /// Subject of the email, used to check it is a newsletter
        #[arg(long, default_value = "")]
        subject: String,
    },

    /// Show the active category configuration
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("digestify=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Digest {
            input,
            threshold,
            format,
            summaries,
            keep_junk,
        } => {
            let config = Config::load()?;
            let threshold = match threshold {
                Some(raw) => parse_threshold(&raw)?,
                None => config.similarity_threshold,
            };

            let mut articles = read_articles(&input)?;
            info!(count = articles.len(), path = %input.display(), "Loaded articles");

            if !keep_junk {
                articles = links::retain_articles(articles);
            }

            let pipeline = config.pipeline()?;
            let mut digest = match pipeline.process(articles, threshold) {
                Ok(digest) => digest,
                Err(PipelineError::EmptyBatch) => {
                    println!("No new articles.");
                    return Ok(());
                }
            };

            if summaries {
                let summarizer = ExtractiveSummarizer::new(config.summary_words);
                summarize_digest(&summarizer, &mut digest).await;
            }

            match format {
                OutputFormat::Terminal => terminal::display_digest(&digest),
                OutputFormat::Markdown => {
                    let today = chrono::Local::now().date_naive();
                    print!("{}", markdown::render_digest(&digest, today));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&digest)?),
            }
        }

        Commands::Links {
            input,
            sender,
            subject,
        } => {
            let body = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            if !newsletter::is_newsletter(&sender, &subject, &body) {
                println!("{}", "This email does not look like a newsletter.".yellow());
            }
            let urls = links::extract_urls(&body);
            if urls.is_empty() {
                println!("{}", "No article links found.".dimmed());
            }
            for url in urls {
                println!("{url}");
            }
        }

        Commands::Categories => {
            let config = Config::load()?;
            terminal::display_categories(&config.category_config()?);
        }
    }

    Ok(())
}

/// Read a JSON array of extracted articles.
fn read_articles(path: &Path) -> Result<Vec<RawArticle>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of articles", path.display()))
}

/// Fill in summaries one article at a time. A failed summary leaves the
/// article without one rather than failing the digest.
async fn summarize_digest(summarizer: &dyn Summarizer, digest: &mut [CategorizedArticle]) {
    let pb = ProgressBar::new(digest.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Summaries [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for entry in digest.iter_mut() {
        match summarizer.summarize_article(&entry.article).await {
            Ok(summary) => entry.summary = Some(summary),
            Err(e) => warn!(error = %e, title = %entry.article.title, "Summary failed"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
}
