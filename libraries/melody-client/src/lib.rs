//! Melody Player API Client
//!
//! HTTP client library for the Melody Player backend.
//!
//! # Features
//!
//! - **Authentication**: form login, signup, current user
//! - **Session state**: token + user tracking with a pluggable token store
//! - **Response normalization**: `detail` error bodies and 204 handling
//!
//! # Example
//!
//! ```ignore
//! use melody_client::{ApiConfig, AuthSession, FileTokenStore, MelodyClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MelodyClient::new(&ApiConfig::new("http://localhost:8000"))?;
//!     let session = AuthSession::new(client, Arc::new(FileTokenStore::new("auth.json")));
//!
//!     // Resume a previous login, if any
//!     let state = session.restore().await;
//!     if !state.is_authenticated() {
//!         let user = session.login("user", "password").await?;
//!         println!("Logged in as {}", user.username);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod response;
mod session;
mod token_store;
mod types;

// Re-export main types
pub use client::MelodyClient;
pub use config::ApiConfig;
pub use error::{ClientError, Result};
pub use response::handle_api_response;
pub use session::{AuthSession, AuthState};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{LibraryTrackRead, Token, TrackRead, UserCreate, UserRead};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
