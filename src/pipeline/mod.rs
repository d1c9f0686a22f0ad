// Pipeline orchestration: raw articles in, ranked categorized digest out.

pub mod articles;
pub mod error;

pub use articles::ArticlePipeline;
pub use error::PipelineError;
