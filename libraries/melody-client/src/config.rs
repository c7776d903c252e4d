//! API connection settings.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    /// Config for a base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Validate and normalize the base URL.
    ///
    /// Rejects empty and non-HTTP URLs and trims trailing slashes.
    pub fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = trimmed.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;

        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let config = ApiConfig::new("https://music.example.com///");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://music.example.com"
        );
    }

    #[test]
    fn rejects_empty_url() {
        let err = ApiConfig::new("  ").normalized_base_url().unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(msg) if msg.contains("empty")));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ApiConfig::new("ftp://example.com")
            .normalized_base_url()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(msg) if msg.contains("http")));
    }

    #[test]
    fn rejects_unparseable_host() {
        assert!(ApiConfig::new("http://").normalized_base_url().is_err());
    }

    #[test]
    fn zero_timeout_is_bumped() {
        assert_eq!(
            ApiConfig::new("http://x").with_timeout_secs(0).timeout(),
            Duration::from_secs(1)
        );
    }
}
