use thiserror::Error;

/// Rule aggregation error types
///
/// Only `ConfigError` terminates a run; every other variant is contained
/// at the source it came from, which is skipped.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregateError>;
