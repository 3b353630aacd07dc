//! HTTP flow tests driving the full router over an in-memory database.

mod common;

use axum::http::{Method, Request, StatusCode, header};
use axum::body::Body;
use chrono::Duration;
use common::*;
use serde_json::{Value, json};

fn access_token(body: &Value) -> String {
    body["token"]["access_token"].as_str().unwrap().to_string()
}

fn refresh_token(body: &Value) -> String {
    body["token"]["refresh_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_not_secret_needs_no_authorization() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/not-secret", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Not secret data"));
}

#[tokio::test]
async fn test_users_without_authorization_header() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/v1/users", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Failed to authorize" }));
}

#[tokio::test]
async fn test_protected_routes_reject_bad_tokens() {
    let app = test_app().await;
    let expired = test_tokens(Duration::seconds(-10), Duration::hours(10))
        .issue_access_token("alice@example.com")
        .unwrap();

    for token in ["garbage", expired.as_str()] {
        for uri in ["/v1/users", "/secret"] {
            let (status, body) = send(&app, get(uri, Some(token))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} with {}", uri, token);
            assert_eq!(body, json!({ "error": "Failed to authorize" }));
        }
    }
}

#[tokio::test]
async fn test_signup_signin_scenario() {
    let app = test_app().await;

    let signup = sign_up(&app, "alice@example.com", "pw123").await;
    assert_eq!(signup["user"]["email"], "alice@example.com");
    assert!(!access_token(&signup).is_empty());
    assert!(!refresh_token(&signup).is_empty());

    let (status, signin) = send(
        &app,
        post_json(
            "/v1/signin",
            &json!({ "email": "alice@example.com", "password": "pw123" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!access_token(&signin).is_empty());
    assert_eq!(signin["user"]["id"], signup["user"]["id"]);

    let (status, wrong) = send(
        &app,
        post_json(
            "/v1/signin",
            &json!({ "email": "alice@example.com", "password": "wrong" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["error_type"], "invalid_credentials");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = test_app().await;
    sign_up(&app, "alice@example.com", "pw123").await;

    let (status, body) = send(
        &app,
        post_json(
            "/v1/signup",
            &json!({ "email": "alice@example.com", "password": "pw123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "already_exists");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/v1/signup",
            &json!({ "email": "nope", "password": "pw123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_signup_missing_password_uses_error_body() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json("/v1/signup", &json!({ "email": "a@example.com" }), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_signin_malformed_json_uses_error_body() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/signin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_with_wrongly_typed_field_uses_error_body() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;

    let (status, body) = send(
        &app,
        post_json(
            "/v1/user/update",
            &json!({ "email": "alice@example.com", "first_name": 42 }),
            Some(&access_token(&signup)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_responses_never_contain_password_hash() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;
    let token = access_token(&signup);

    let (_, users) = send(&app, get("/v1/users", Some(&token))).await;

    for body in [signup.to_string(), users.to_string()] {
        assert!(!body.contains("password"), "leaked: {}", body);
        assert!(!body.contains("$2b$"), "leaked: {}", body);
    }
}

#[tokio::test]
async fn test_secret_with_access_token() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;

    let (status, body) = send(&app, get("/secret", Some(&access_token(&signup)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!("Top Secret data only authorized users can access this info")
    );

    let (status, _) = send(&app, get("/secret", Some(&refresh_token(&signup)))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users() {
    let app = test_app().await;
    let alice = sign_up(&app, "alice@example.com", "pw123").await;
    sign_up(&app, "bob@example.com", "pw456").await;

    let (status, body) = send(&app, get("/v1/users", Some(&access_token(&alice)))).await;

    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);
}

#[tokio::test]
async fn test_refresh_token_via_header_and_query() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;
    let refresh = refresh_token(&signup);

    let (status, body) = send(&app, get("/v1/refresh-token", Some(&refresh))).await;
    assert_eq!(status, StatusCode::OK);
    let from_header = body["access_token"].as_str().unwrap().to_string();

    let uri = format!("/v1/refresh-token?refresh_token={}", refresh);
    let (status, body) = send(&app, get(&uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    let from_query = body["access_token"].as_str().unwrap().to_string();

    for token in [from_header, from_query] {
        let (status, _) = send(&app, get("/secret", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_refresh_token_rejections() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;

    let (status, body) = send(&app, get("/v1/refresh-token", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Failed to authorize" }));

    let (status, _) = send(
        &app,
        get("/v1/refresh-token", Some(&access_token(&signup))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = test_tokens(Duration::minutes(30), Duration::seconds(-10))
        .issue_refresh_token("alice@example.com")
        .unwrap();
    let (status, _) = send(&app, get("/v1/refresh-token", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = test_app().await;
    let signup = sign_up(&app, "alice@example.com", "pw123").await;
    let token = access_token(&signup);

    let (status, body) = send(
        &app,
        post_json(
            "/v1/user/update",
            &json!({
                "email": "alice@example.com",
                "first_name": "Alice",
                "password": "new-password"
            }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");

    let (status, _) = send(
        &app,
        post_json(
            "/v1/signin",
            &json!({ "email": "alice@example.com", "password": "new-password" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_requires_authorization() {
    let app = test_app().await;
    sign_up(&app, "alice@example.com", "pw123").await;

    let (status, body) = send(
        &app,
        post_json(
            "/v1/user/update",
            &json!({ "email": "alice@example.com", "first_name": "Mallory" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Failed to authorize" }));
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let app = test_app().await;
    sign_up(&app, "alice@example.com", "pw123").await;
    let bob = sign_up(&app, "bob@example.com", "pw456").await;

    let (status, body) = send(
        &app,
        post_json(
            "/v1/user/update",
            &json!({ "email": "alice@example.com", "first_name": "Mallory" }),
            Some(&access_token(&bob)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_type"], "permission_denied");
}

#[tokio::test]
async fn test_update_unregistered_identity_is_not_found() {
    let app = test_app().await;
    let token = test_tokens(Duration::minutes(30), Duration::hours(10))
        .issue_access_token("ghost@example.com")
        .unwrap();

    let (status, body) = send(
        &app,
        post_json(
            "/v1/user/update",
            &json!({ "email": "ghost@example.com", "first_name": "Ghost" }),
            Some(&token),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/signin")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
