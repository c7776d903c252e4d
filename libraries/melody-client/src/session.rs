//! Authenticated session state.
//!
//! Tracks the current token and user for the whole app and keeps the token
//! store in sync with them. Any failure while establishing a session leaves
//! both the state and the store cleared.

use crate::client::MelodyClient;
use crate::error::{ClientError, Result};
use crate::token_store::TokenStore;
use crate::types::{UserCreate, UserRead};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Snapshot of the auth state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub auth_token: Option<String>,
    pub user_info: Option<UserRead>,
    /// True until the first restore finishes and while a call is in flight
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            auth_token: None,
            user_info: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

/// Shared auth session.
///
/// Clones share state.
#[derive(Clone)]
pub struct AuthSession {
    client: MelodyClient,
    store: Arc<dyn TokenStore>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthSession {
    pub fn new(client: MelodyClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    pub fn client(&self) -> &MelodyClient {
        &self.client
    }

    /// Current state
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Current token, if logged in
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.auth_token.clone()
    }

    /// Pick up a stored token and the user it belongs to.
    ///
    /// A stored token the backend no longer accepts is discarded. Never
    /// fails: problems are logged and leave the session logged out.
    pub async fn restore(&self) -> AuthState {
        self.set_loading(true).await;

        match self.store.load().await {
            Ok(Some(token)) => {
                debug!("Stored auth token found, fetching user info");
                self.state.write().await.auth_token = Some(token.clone());
                if let Err(e) = self.fetch_user_info(&token).await {
                    warn!(error = %e, "Stored auth token rejected");
                }
            }
            Ok(None) => {
                debug!("No stored auth token");
                self.reset_state().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to load auth token");
                self.reset_state().await;
                self.clear_store().await;
            }
        }

        self.set_loading(false).await;
        self.state().await
    }

    /// Log in and load the user.
    ///
    /// On failure the token is dropped from both state and store.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserRead> {
        self.set_loading(true).await;
        let result = self.login_inner(username, password).await;

        if let Err(e) = &result {
            error!(error = %e, username = %username, "Login failed");
            self.clear_store().await;
            self.reset_state().await;
        }
        self.set_loading(false).await;
        result
    }

    async fn login_inner(&self, username: &str, password: &str) -> Result<UserRead> {
        let token = self.client.auth().login(username, password).await?;
        self.store.save(&token.access_token).await?;
        self.state.write().await.auth_token = Some(token.access_token.clone());
        self.fetch_user_info(&token.access_token).await
    }

    /// Create an account. The caller logs in separately.
    pub async fn signup(&self, user: &UserCreate) -> Result<UserRead> {
        self.set_loading(true).await;
        let result = self.client.auth().signup(user).await;
        if let Err(e) = &result {
            error!(error = %e, username = %user.username, "Signup failed");
        }
        self.set_loading(false).await;
        result
    }

    /// Drop the token and user. Store failures are logged, not returned.
    pub async fn logout(&self) {
        self.clear_store().await;
        self.reset_state().await;
        info!("Logged out");
    }

    /// Reload the user for the current token.
    ///
    /// Without a token this is a logged no-op. A rejected token logs out.
    pub async fn refresh_user_info(&self) -> Result<Option<UserRead>> {
        let Some(token) = self.token().await else {
            debug!("Cannot fetch user info, no auth token");
            return Ok(None);
        };

        self.set_loading(true).await;
        let result = self.fetch_user_info(&token).await;
        self.set_loading(false).await;
        result.map(Some)
    }

    /// Current user, requiring a token
    pub async fn require_user(&self) -> Result<UserRead> {
        let state = self.state().await;
        match (state.auth_token, state.user_info) {
            (Some(_), Some(user)) => Ok(user),
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    async fn fetch_user_info(&self, token: &str) -> Result<UserRead> {
        match self.client.auth().current_user(token).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "User info fetched");
                self.state.write().await.user_info = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.logout().await;
                Err(e)
            }
        }
    }

    async fn clear_store(&self) {
        if let Err(e) = self.store.clear().await {
            error!(error = %e, "Failed to clear auth token");
        }
    }

    async fn reset_state(&self) {
        let mut state = self.state.write().await;
        state.auth_token = None;
        state.user_info = None;
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.is_loading = loading;
    }
}
