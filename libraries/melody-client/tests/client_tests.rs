//! Tests for the Melody API client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use melody_client::{
    handle_api_response, ApiConfig, AuthSession, ClientError, FileTokenStore, MelodyClient,
    MemoryTokenStore, TokenStore, UserCreate, UserRead,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "alice",
        "email": "alice@example.com",
        "created_at": "2024-05-01T12:00:00"
    })
}

fn client_for(server: &MockServer) -> MelodyClient {
    MelodyClient::new(&ApiConfig::new(server.uri())).unwrap()
}

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_me(server: &MockServer, token: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(MelodyClient::new(&ApiConfig::new("https://music.example.com")).is_ok());
        assert!(MelodyClient::new(&ApiConfig::new("http://localhost:8000")).is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = MelodyClient::new(&ApiConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let result = MelodyClient::new(&ApiConfig::new("localhost:8000"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}

// =============================================================================
// Response Normalization Tests
// =============================================================================

mod response_normalization {
    use super::*;

    #[tokio::test]
    async fn test_no_content_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tracks/1/like"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body: Option<serde_json::Value> = client
            .post_json("/tracks/1/like", &json!({}), Some("tok"))
            .await
            .unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_detail_becomes_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"detail": "Not allowed"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<serde_json::Value>("library", None)
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Not allowed");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_detail_uses_status_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"oops": true})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<serde_json::Value>("library", None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Request failed with status 404");
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_bearer_and_json_headers_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .and(header("authorization", "Bearer tok-9"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let body: Option<Vec<serde_json::Value>> = client_for(&server)
            .get_json("/library", Some("tok-9"))
            .await
            .unwrap();
        assert_eq!(body, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_handle_api_response_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .mount(&server)
            .await;

        let response = reqwest::get(format!("{}/users/me", server.uri()))
            .await
            .unwrap();
        let user: Option<UserRead> = handle_api_response(response).await.unwrap();
        assert_eq!(user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).auth().current_user("tok").await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}

// =============================================================================
// Auth Endpoint Tests
// =============================================================================

mod auth_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_login_posts_form() {
        let server = MockServer::start().await;
        mount_login_ok(&server).await;

        let token = client_for(&server)
            .auth()
            .login("alice", "hunter2")
            .await
            .unwrap();
        assert_eq!(token.access_token, "tok-123");
        assert_eq!(token.token_type, "bearer");
    }

    #[tokio::test]
    async fn test_signup_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_json(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .mount(&server)
            .await;

        let user = client_for(&server)
            .auth()
            .signup(&UserCreate::new("alice", "alice@example.com", "hunter2"))
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Incorrect username or password"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .auth()
            .login("alice", "wrong")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Incorrect username or password");
    }
}

// =============================================================================
// Auth Session Tests
// =============================================================================

mod auth_session {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_token_and_user() {
        let server = MockServer::start().await;
        mount_login_ok(&server).await;
        mount_me(
            &server,
            "tok-123",
            ResponseTemplate::new(200).set_body_json(user_json()),
        )
        .await;

        let store = Arc::new(MemoryTokenStore::new());
        let session = AuthSession::new(client_for(&server), store.clone());

        let user = session.login("alice", "hunter2").await.unwrap();
        assert_eq!(user.username, "alice");

        let state = session.state().await;
        assert_eq!(state.auth_token.as_deref(), Some("tok-123"));
        assert_eq!(state.user_info.map(|u| u.id), Some(7));
        assert!(!state.is_loading);
        assert_eq!(store.load().await.unwrap().as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_login_failure_clears_token() {
        let server = MockServer::start().await;
        mount_login_ok(&server).await;
        mount_me(
            &server,
            "tok-123",
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})),
        )
        .await;

        let store = Arc::new(MemoryTokenStore::with_token("old-token"));
        let session = AuthSession::new(client_for(&server), store.clone());

        let err = session.login("alice", "hunter2").await.unwrap_err();
        assert_eq!(err.to_string(), "Token expired");

        let state = session.state().await;
        assert!(state.auth_token.is_none());
        assert!(state.user_info.is_none());
        assert!(!state.is_loading);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let server = MockServer::start().await;
        mount_me(
            &server,
            "saved",
            ResponseTemplate::new(200).set_body_json(user_json()),
        )
        .await;

        let session = AuthSession::new(
            client_for(&server),
            Arc::new(MemoryTokenStore::with_token("saved")),
        );
        assert!(session.state().await.is_loading);

        let state = session.restore().await;
        assert!(state.is_authenticated());
        assert_eq!(state.user_info.unwrap().username, "alice");
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_logs_out() {
        let server = MockServer::start().await;
        mount_me(&server, "stale", ResponseTemplate::new(401)).await;

        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileTokenStore::new(dir.path().join("auth.json")));
        store.save("stale").await.unwrap();

        let session = AuthSession::new(client_for(&server), store.clone());
        let state = session.restore().await;

        assert!(!state.is_authenticated());
        assert!(state.user_info.is_none());
        assert!(!state.is_loading);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(0)
            .mount(&server)
            .await;

        let session = AuthSession::new(client_for(&server), Arc::new(MemoryTokenStore::new()));
        let state = session.restore().await;
        assert!(!state.is_authenticated());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_noop() {
        let server = MockServer::start().await;
        let session = AuthSession::new(client_for(&server), Arc::new(MemoryTokenStore::new()));

        assert_eq!(session.refresh_user_info().await.unwrap(), None);
        assert!(matches!(
            session.require_user().await,
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_signup_does_not_log_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let session = AuthSession::new(client_for(&server), store.clone());
        session
            .signup(&UserCreate::new("alice", "alice@example.com", "hunter2"))
            .await
            .unwrap();

        assert!(!session.state().await.is_authenticated());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let server = MockServer::start().await;
        mount_login_ok(&server).await;
        mount_me(
            &server,
            "tok-123",
            ResponseTemplate::new(200).set_body_json(user_json()),
        )
        .await;

        let store = Arc::new(MemoryTokenStore::new());
        let session = AuthSession::new(client_for(&server), store.clone());
        session.login("alice", "hunter2").await.unwrap();

        session.logout().await;
        let state = session.state().await;
        assert!(state.auth_token.is_none());
        assert!(state.user_info.is_none());
        assert_eq!(store.load().await.unwrap(), None);
    }
}
