//! Centralized error types for DevHub.

use thiserror::Error;

/// Main error type for DevHub operations.
#[derive(Error, Debug)]
pub enum DevhubError {
    #[error("Index {index} out of range for layout of {len} widgets")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Storage error: {0}")]
    Storage(#[from] devhub_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for DevHub operations.
pub type DevhubResult<T> = Result<T, DevhubError>;

impl DevhubError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
