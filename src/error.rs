//! Error taxonomy for the summary converters
//!
//! Every error is fatal: the converters are single-shot batch filters, so
//! errors propagate to `main` and terminate the process with a non-zero exit.

use thiserror::Error;

/// Errors that can occur while converting a summary document
#[derive(Error, Debug)]
pub enum ReqplotError {
    #[error("Invalid summary document: {0}")]
    Parse(String),

    #[error("Request #{index} is missing required field `{field}`")]
    Field { index: usize, field: &'static str },

    #[error("Request #{index} has malformed `{field}` timestamp {value:?}")]
    TimeParse {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ReqplotError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ReqplotError::Io(err.into())
        } else {
            ReqplotError::Parse(err.to_string())
        }
    }
}

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ReqplotError>;
