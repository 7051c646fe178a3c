// ABOUTME: Integration tests for the GoTrue client against a mock server
// ABOUTME: Covers password sign-in, sign-up confirmation, refresh, and sign-out

use chrono::{Duration, Utc};
use daybook_auth::{AuthError, AuthManager, AuthProvider, SessionStore, SupabaseAuth};
use daybook_config::SupabaseConfig;
use daybook_core::{Session, User};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SupabaseAuth {
    let config = SupabaseConfig::new(server.uri(), "anon-key");
    SupabaseAuth::new(&config, std::time::Duration::from_secs(5)).unwrap()
}

fn token_body(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": { "id": "user-1", "email": "test@example.com" }
    })
}

#[tokio::test]
async fn test_password_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({ "email": "test@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-1")))
        .mount(&server)
        .await;

    let session = client(&server)
        .sign_in_with_password("test@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(session.access_token, "access-1");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(session.user.id, "user-1");
    assert!(session.is_valid());
}

#[tokio::test]
async fn test_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .sign_in_with_password("test@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        AuthError::InvalidCredentials(msg) => assert_eq!(msg, "Invalid login credentials"),
        other => panic!("Expected InvalidCredentials, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sign_up_awaiting_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-2",
            "email": "new@example.com",
            "confirmation_sent_at": "2024-06-01T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let session = client(&server)
        .sign_up("new@example.com", "secret")
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn test_sign_out_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session {
        access_token: "access-1".to_string(),
        refresh_token: None,
        expires_at: Utc::now() + Duration::hours(1),
        user: User {
            id: "user-1".to_string(),
            email: None,
        },
    };
    client(&server).sign_out(&session).await.unwrap();
}

#[tokio::test]
async fn test_restore_refreshes_expired_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-0" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2")))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.toml"));
    store
        .save(&Session {
            access_token: "access-0".to_string(),
            refresh_token: Some("refresh-0".to_string()),
            expires_at: Utc::now() - Duration::minutes(1),
            user: User {
                id: "user-1".to_string(),
                email: None,
            },
        })
        .await
        .unwrap();

    let manager = AuthManager::new(Arc::new(client(&server)), store.clone());
    let ctx = manager.restore().await.unwrap();

    assert_eq!(ctx.require().unwrap().access_token, "access-2");
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.access_token, "access-2");
}

#[tokio::test]
async fn test_restore_discards_unrefreshable_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid Refresh Token"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.toml"));
    store
        .save(&Session {
            access_token: "access-0".to_string(),
            refresh_token: Some("stale".to_string()),
            expires_at: Utc::now() - Duration::minutes(1),
            user: User {
                id: "user-1".to_string(),
                email: None,
            },
        })
        .await
        .unwrap();

    let manager = AuthManager::new(Arc::new(client(&server)), store.clone());
    let ctx = manager.restore().await.unwrap();

    assert!(!ctx.is_authenticated());
    assert!(store.load().await.unwrap().is_none());
}

fn expired_session(refresh_token: &str) -> Session {
    Session {
        access_token: "access-0".to_string(),
        refresh_token: Some(refresh_token.to_string()),
        expires_at: Utc::now() - Duration::minutes(1),
        user: User {
            id: "user-1".to_string(),
            email: None,
        },
    }
}

#[tokio::test]
async fn test_restore_keeps_session_when_auth_service_unreachable() {
    // Nothing listens on the discard port
    let auth = SupabaseAuth::new(
        &SupabaseConfig::new("http://127.0.0.1:9", "anon-key"),
        std::time::Duration::from_secs(2),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.toml"));
    store.save(&expired_session("refresh-0")).await.unwrap();

    let manager = AuthManager::new(Arc::new(auth), store.clone());
    let err = manager.restore().await.unwrap_err();

    assert!(matches!(err, AuthError::Network(_)));
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("refresh-0"));
}

#[tokio::test]
async fn test_restore_keeps_session_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "msg": "upstream unavailable"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.toml"));
    store.save(&expired_session("refresh-0")).await.unwrap();

    let manager = AuthManager::new(Arc::new(client(&server)), store.clone());
    match manager.restore().await {
        Err(AuthError::Provider { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected provider error, got {:?}", other),
    }
    assert!(store.load().await.unwrap().is_some());
}
