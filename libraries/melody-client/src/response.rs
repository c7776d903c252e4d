//! Response normalization.
//!
//! Every backend call funnels its response through [`handle_api_response`]
//! so error bodies and empty responses are treated the same everywhere.

use crate::error::{ClientError, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;

/// Turn a backend response into a parsed body.
///
/// - 2xx with 204 No Content: `Ok(None)`
/// - other 2xx: the JSON body parsed as `T`
/// - non-2xx: [`ClientError::Api`] carrying the body's `detail` string, or
///   the status reason when the body has none, or
///   `Request failed with status <code>` as a last resort
pub async fn handle_api_response<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        error!(status = status.as_u16(), message = %message, "API error response");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Like [`handle_api_response`] but a missing body is an error.
pub(crate) async fn expect_body<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    handle_api_response(response)
        .await?
        .ok_or_else(|| ClientError::Parse("Expected a response body".into()))
}

fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || format!("Request failed with status {}", status.as_u16());

    match serde_json::from_str::<serde_json::Value>(body) {
        // A parseable body: only a string `detail` counts
        Ok(value) => value
            .get("detail")
            .and_then(serde_json::Value::as_str)
            .map_or_else(fallback, str::to_string),
        // Unparseable body: fall back to the status text
        Err(_) => status
            .canonical_reason()
            .map_or_else(fallback, str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_wins() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Username already registered"}"#,
        );
        assert_eq!(message, "Username already registered");
    }

    #[test]
    fn structured_detail_falls_back_to_status() {
        // Validation errors carry a list, not a string
        let message = error_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
        );
        assert_eq!(message, "Request failed with status 422");
    }

    #[test]
    fn json_without_detail_falls_back_to_status() {
        let message = error_message(StatusCode::NOT_FOUND, r#"{"error":"nope"}"#);
        assert_eq!(message, "Request failed with status 404");
    }

    #[test]
    fn non_json_body_uses_reason_phrase() {
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(message, "Internal Server Error");
    }
}
