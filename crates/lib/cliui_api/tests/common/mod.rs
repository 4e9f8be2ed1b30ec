//! Shared fixtures: in-memory database, scripted tool runner, request helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use cliui_api::config::ApiConfig;
use cliui_api::AppState;
use cliui_core::mcp::{GatewayError, McpCliGateway, ToolOutput, ToolRunner};
use cliui_core::sessions::SessionRegistry;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Tool runner answering from a script keyed by subcommand.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: HashMap<String, ToolOutput>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn reply(mut self, subcommand: &str, success: bool, stdout: &str, stderr: &str) -> Self {
        self.replies.insert(
            subcommand.to_string(),
            ToolOutput {
                success,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(&self, args: &[String]) -> Result<ToolOutput, GatewayError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let subcommand = args.first().cloned().unwrap_or_default();
        match self.replies.get(&subcommand) {
            Some(out) => Ok(out.clone()),
            None => Err(GatewayError::Spawn(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            ))),
        }
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_path: ":memory:".into(),
        jwt_secret: SECRET.into(),
        token_lifetime_secs: 3600,
        bcrypt_cost: 4,
        tool_bin: "gemini".into(),
        tool_args: Vec::new(),
        sessions_dir: "/nonexistent/sessions".into(),
        request_timeout: Duration::from_secs(30),
    }
}

pub async fn test_app(runner: Arc<ScriptedRunner>) -> (Router, AppState) {
    test_app_with(runner, test_config()).await
}

pub async fn test_app_with(runner: Arc<dyn ToolRunner>, config: ApiConfig) -> (Router, AppState) {
    let pool = cliui_core::db::connect_in_memory()
        .await
        .expect("in-memory database");
    let state = AppState {
        pool,
        gateway: Arc::new(McpCliGateway::new(runner)),
        sessions: Arc::new(SessionRegistry::new(config.sessions_dir.clone())),
        config,
    };
    (cliui_api::router(state.clone()), state)
}

/// Send one request, returning the status and JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

/// Send a raw body with an optional content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register the account and return its token.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["token"].as_str().expect("token").to_string()
}
