//! Integration tests: single-user setup, login and the token gate.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use common::{ScriptedRunner, SECRET, register, send, send_raw, test_app};
use serde_json::json;

#[tokio::test]
async fn status_reports_setup_until_first_registration() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;

    let (status, body) = send(&app, Method::GET, "/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"needsSetup": true, "isAuthenticated": false}));

    register(&app, "admin", "secret1").await;

    let (_, body) = send(&app, Method::GET, "/auth/status", None, None).await;
    assert_eq!(body["needsSetup"], false);
}

#[tokio::test]
async fn register_returns_user_and_token() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"username": "admin", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"]["id"].is_i64());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn second_registration_is_forbidden() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    register(&app, "admin", "secret1").await;

    for username in ["admin", "someone-else"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"username": username, "password": "another1"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["message"],
            "User already exists. This is a single-user system."
        );
    }
}

#[tokio::test]
async fn register_validates_input() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;

    let cases = [
        json!({"password": "secret1"}),
        json!({"username": "admin"}),
        json!({"username": "ab", "password": "secret1"}),
        json!({"username": "admin", "password": "12345"}),
    ];
    for case in cases {
        let (status, body) = send(&app, Method::POST, "/auth/register", None, Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    // Nothing was created.
    let (_, body) = send(&app, Method::GET, "/auth/status", None, None).await;
    assert_eq!(body["needsSetup"], true);
}

#[tokio::test]
async fn login_succeeds_and_token_passes_gate() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    register(&app, "admin", "secret1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "admin", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/auth/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"]["lastLogin"].is_string());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_identical() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    register(&app, "admin", "secret1").await;

    let (s1, b1) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "admin", "password": "wrong-password"})),
    )
    .await;
    let (s2, b2) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "nobody", "password": "secret1"})),
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2);
}

#[tokio::test]
async fn gate_rejects_missing_malformed_and_expired_tokens() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    register(&app, "admin", "secret1").await;

    let (status, body) = send(&app, Method::GET, "/auth/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access denied. No token provided.");

    let (status, body) = send(&app, Method::GET, "/auth/user", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let expired =
        cliui_core::auth::jwt::generate_token(1, "admin", SECRET.as_bytes(), Duration::seconds(-60))
            .unwrap();
    let (status, body) = send(&app, Method::GET, "/auth/user", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn token_for_missing_user_is_invalid() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    let token =
        cliui_core::auth::jwt::generate_token(42, "ghost", SECRET.as_bytes(), Duration::hours(1))
            .unwrap();

    let (status, body) = send(&app, Method::GET, "/auth/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn logout_requires_token_and_succeeds() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;
    let token = register(&app, "admin", "secret1").await;

    let (status, _) = send(&app, Method::POST, "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Logged out successfully"})
    );
}

#[tokio::test]
async fn health_reports_database() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dbConnected"], true);
    assert_eq!(body["version"], cliui_core::version());
}

#[tokio::test]
async fn malformed_bodies_are_validation_errors() {
    let (app, _) = test_app(Arc::new(ScriptedRunner::default())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"username": 123, "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/auth/login",
        None,
        None,
        r#"{"username": "admin", "password": "secret1"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some("application/x-www-form-urlencoded"),
        "username=admin&password=secret1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some("application/json"),
        "{not json",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}
