use geopop_world::AreaScope;
use thiserror::Error;

/// Failure reported by a fact provider. Always surfaced to the caller, never
/// folded into an empty result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Fact source unavailable: {0}")]
    Unavailable(String),

    #[error("Fact query failed: {0}")]
    Query(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RollupError {
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Invalid limit: {0} (top-N requires a positive limit)")]
    InvalidLimit(i64),

    #[error("Fetch failure: {0}")]
    FetchFailure(#[from] FetchError),

    #[error("No population record for {scope}")]
    NotFound { scope: AreaScope },

    #[error("Invalid breakdown: {0}")]
    InvalidBreakdown(String),

    #[error("Invalid fact: {0}")]
    InvalidFact(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RollupError>;
