// Ingestion helpers: newsletter detection, link extraction, junk filtering
// and URL normalization.

pub mod links;
pub mod newsletter;
pub mod url;
