// Digestify: deduplicated, categorized digests from newsletter articles
//
// This is the library root. Each module corresponds to a stage of the
// digest pipeline or one of the helpers around it.

pub mod article;
pub mod categorize;
pub mod config;
pub mod dedup;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod summarize;
