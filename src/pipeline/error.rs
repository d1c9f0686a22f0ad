use thiserror::Error;

/// Errors intrinsic to the article pipeline. It performs no I/O, so the
/// only failure is an input contract violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No articles to process: the batch is empty")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
