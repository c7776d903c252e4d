//! Core error types for Melody Player

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Melody Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catalog document is not valid JSON of the expected shape
    #[error("Malformed catalog: {0}")]
    Serialization(#[from] serde_json::Error),
}
