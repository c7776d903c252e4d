//! Melody CLI Library
//!
//! Terminal front end for Melody Player: an interactive "now playing" view
//! over the catalog plus account commands against the backend.
//!
//! This library exposes the building blocks of the `melody` binary for testing.

pub mod config;
pub mod error;
pub mod input;
pub mod player;
pub mod render;

// Re-export commonly used types for convenience
pub use config::MelodyConfig;
pub use error::{CliError, Result};

use melody_core::InMemoryCatalog;

/// Catalog named by the config, or the built-in sample lists
pub fn load_catalog(config: &MelodyConfig) -> Result<InMemoryCatalog> {
    match &config.catalog.path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog file");
            Ok(InMemoryCatalog::from_json_file(path)?)
        }
        None => Ok(InMemoryCatalog::sample()),
    }
}
