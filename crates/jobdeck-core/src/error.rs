//! Error types for jobdeck-core

use thiserror::Error;

/// Result type alias using jobdeck-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jobdeck-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
