//! Integration tests for registration, login, and bearer authentication.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, test_config};

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "ada", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User registered successfully");

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "ada", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].is_string());
    assert_eq!(response.body["user"]["username"], "ada");
    assert!(response.body["user"]["id"].is_string());
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "ada" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "Username and password are required");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "ada", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let app = TestApp::new();
    app.register_and_login("ada").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "ada", "password": "another1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Username already exists");
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register_and_login("ada").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "ada", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_user_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "nobody", "password": "whatever" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "ada");
}

#[tokio::test]
async fn test_token_from_other_secret_is_forbidden() {
    let app = TestApp::new();
    let token = app.register_and_login("ada").await;

    let mut other = test_config();
    other.auth.jwt_secret = "a-different-secret".to_string();
    let other_app = TestApp::with_config(other);

    let response = other_app
        .request("GET", "/api/notes", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_seed_user_can_log_in() {
    let mut config = test_config();
    config.auth.seed_user.enabled = true;
    let app = TestApp::with_config(config);

    let token = app.login("admin", "password").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}
