//! Custom error types for quote resolution

use thiserror::Error;

/// Quote pipeline errors.
///
/// The four pipeline variants (`SourceUnavailable`, `SourceTimeout`,
/// `SourceEmptyResult`, `TranslationUnavailable`) never leave the resolver;
/// they are logged and turned into "try the next mechanism".
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Source answered with a non-success status
    #[error("Source {source_id} unavailable: HTTP {status}")]
    SourceUnavailable {
        source_id: String,
        status: u16,
    },

    /// Source did not answer in time
    #[error("Source {source_id} timed out after {timeout_ms}ms")]
    SourceTimeout {
        source_id: String,
        timeout_ms: u64,
    },

    /// Source answered but nothing usable could be extracted
    #[error("Source {source_id} returned no usable quote")]
    SourceEmptyResult {
        source_id: String,
    },

    /// Translation failed (status, timeout or empty translated field)
    #[error("Translation unavailable: {reason}")]
    TranslationUnavailable {
        reason: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Theme storage error
    #[error("Storage error: {path} - {message}")]
    StorageError {
        path: String,
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for QuoteError {
    fn from(err: anyhow::Error) -> Self {
        QuoteError::InternalError(err.to_string())
    }
}

/// Result type for quote operations
pub type Result<T> = std::result::Result<T, QuoteError>;
