//! Main Melody API client.

use crate::auth::AuthClient;
use crate::config::ApiConfig;
use crate::error::{ClientError, Result};
use crate::response::handle_api_response;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct MelodyClient {
    http: Client,
    base_url: String,
}

impl MelodyClient {
    /// Create a client, validating the base URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MelodyPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(base_url = %base_url, "API client created");
        Ok(Self { http, base_url })
    }

    /// Normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Auth and user endpoints
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// Request builder with the standard headers.
    ///
    /// Adds `Authorization: Bearer <token>` when a token is given.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a JSON resource; `None` on 204
    pub async fn get_json<T>(&self, path: &str, token: Option<&str>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, path, token).send().await?;
        handle_api_response(response).await
    }

    /// POST a JSON body; `None` on 204
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;
        handle_api_response(response).await
    }
}
