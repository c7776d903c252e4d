//! Authentication endpoints.

use crate::error::Result;
use crate::response::expect_body;
use crate::types::{LoginForm, Token, UserCreate, UserRead};
use reqwest::Client;
use tracing::{debug, info};

/// Raw calls to the auth and user endpoints.
///
/// Stateless: tokens are passed in and handed back, never kept.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// The backend expects an OAuth2 password form, not JSON.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let response = self
            .http
            .post(&url)
            .form(&LoginForm { username, password })
            .send()
            .await?;

        let token: Token = expect_body(response).await?;
        info!(username = %username, token_type = %token.token_type, "Login successful");
        Ok(token)
    }

    /// Register a new account. Does not log in.
    pub async fn signup(&self, user: &UserCreate) -> Result<UserRead> {
        let url = format!("{}/auth/signup", self.base_url);
        debug!(url = %url, username = %user.username, "Signing up");

        let response = self.http.post(&url).json(user).send().await?;

        let created: UserRead = expect_body(response).await?;
        info!(user_id = created.id, username = %created.username, "Signup successful");
        Ok(created)
    }

    /// Fetch the user a token belongs to.
    pub async fn current_user(&self, access_token: &str) -> Result<UserRead> {
        let url = format!("{}/users/me", self.base_url);
        debug!(url = %url, "Fetching current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        expect_body(response).await
    }
}
