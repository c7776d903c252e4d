//! Error types for the Melody API client.

use thiserror::Error;

/// Errors that can occur when talking to the Melody backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Operation needs a token and none is held
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Token storage failed
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status for backend errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
