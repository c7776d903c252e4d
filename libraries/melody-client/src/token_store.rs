//! Persistent storage for the auth token.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// Where the bearer token survives between runs.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Stored token, if any
    async fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token
    async fn save(&self, token: &str) -> Result<()>;

    /// Forget the stored token; clearing an empty store succeeds
    async fn clear(&self) -> Result<()>;
}

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    auth_token: String,
}

/// Token store backed by a small JSON file.
///
/// File layout: `{ "auth_token": "..." }`. A missing file means no token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredToken = serde_json::from_str(&contents).map_err(|e| {
            ClientError::TokenStore(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(stored.auth_token).filter(|t| !t.is_empty()))
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_string_pretty(&StoredToken {
            auth_token: token.to_string(),
        })
        .map_err(|e| ClientError::TokenStore(e.to_string()))?;

        tokio::fs::write(&self.path, body).await?;
        debug!(path = %self.path.display(), "Auth token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Auth token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
