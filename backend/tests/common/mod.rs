//! Shared helpers for the HTTP flow tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use user_accounts::{
    app,
    config::{Config, DEFAULT_CORS_ORIGINS},
    database::Database,
    services::token_service::TokenService,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expires_in_seconds: 1800,
        refresh_token_expires_in_seconds: 36000,
        bcrypt_cost: 4,
        server_port: 0,
        cors_allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
    }
}

/// Token service sharing the test secret, for minting tokens directly.
pub fn test_tokens(access_ttl: Duration, refresh_ttl: Duration) -> TokenService {
    TokenService::new(TEST_SECRET, access_ttl, refresh_ttl)
}

/// Fresh application over its own empty in-memory database.
pub async fn test_app() -> Router {
    let config = test_config();
    let db = Database::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let tokens = Arc::new(TokenService::from_config(&config).unwrap());

    app(db.pool().clone(), tokens, config)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

pub fn post_json(uri: &str, body: &Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Signs up `email`/`password` and returns the response body.
pub async fn sign_up(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        post_json(
            "/v1/signup",
            &serde_json::json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body
}
