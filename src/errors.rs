use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures bookkeeping client failures.
#[derive(Debug, Error)]
pub enum BookkeepingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Usage: {0}")]
    Usage(String),
}

pub type Result<T> = StdResult<T, BookkeepingError>;
