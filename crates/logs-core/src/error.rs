use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the lambda-logs crates.
#[derive(Error, Debug)]
pub enum LambdaLogError {
    /// The log-retrieval collaborator failed (auth, network, missing stream).
    #[error("Failed to retrieve events from {log_group}/{log_stream}: {message}")]
    Retrieval {
        log_group: String,
        log_stream: String,
        message: String,
    },

    /// A REPORT field could not be parsed after unit-suffix stripping.
    #[error("Malformed {field} value: {value:?}")]
    MalformedRecord { field: String, value: String },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl LambdaLogError {
    /// Build a [`LambdaLogError::Retrieval`] for the given stream.
    pub fn retrieval(log_group: &str, log_stream: &str, message: impl Into<String>) -> Self {
        Self::Retrieval {
            log_group: log_group.to_string(),
            log_stream: log_stream.to_string(),
            message: message.into(),
        }
    }

    /// Build a [`LambdaLogError::MalformedRecord`].
    pub fn malformed(field: &str, value: &str) -> Self {
        Self::MalformedRecord {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience alias used throughout the lambda-logs crates.
pub type Result<T> = std::result::Result<T, LambdaLogError>;
