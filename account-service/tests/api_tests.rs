mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn register(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/api/register")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/api/login")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login_token(app: &TestApp, email: &str, password: &str) -> String {
    let body: Value = login(app, email, password)
        .await
        .json()
        .await
        .expect("Failed to parse response");
    body["payload"]
        .as_str()
        .expect("login should return a token")
        .to_string()
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = register(&app, "a@x.com", "p1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["messages"][0], "Registration successful");
    assert!(body.get("payload").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    register(&app, "a@x.com", "p1").await;

    let response = register(&app, "a@x.com", "p2").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = register(&app, "not-an-email", "p1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "INVALID_EMAIL");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    register(&app, "a@x.com", "p1").await;

    let response = login(&app, "a@x.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_CREDENTIALS");
    assert!(body.get("payload").is_none());
}

#[tokio::test]
async fn test_validate_token_valid_then_expired() {
    let app = TestApp::spawn().await;
    register(&app, "a@x.com", "p1").await;
    let token = login_token(&app, "a@x.com", "p1").await;

    let response = app
        .post_with_token("/api/validate-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["payload"]["status"], "VALID");
    assert_eq!(body["payload"]["subject"], "a@x.com");

    app.harness.clock.advance(Duration::seconds(61));

    let response = app
        .post_with_token("/api/validate-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "TOKEN_EXPIRED");
    assert_eq!(body["payload"]["status"], "EXPIRED");
}

#[tokio::test]
async fn test_validate_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post_with_token("/api/validate-token", "garbage")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[tokio::test]
async fn test_refresh_and_logout() {
    let app = TestApp::spawn().await;
    register(&app, "a@x.com", "p1").await;
    let access = login_token(&app, "a@x.com", "p1").await;

    app.harness.clock.advance(Duration::seconds(61));

    let response = app
        .post("/api/refresh-token")
        .json(&json!({ "email": "a@x.com", "password": "p1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let refreshed = body["payload"].as_str().unwrap().to_string();
    assert_ne!(refreshed, access);

    let response = app
        .post_with_token("/api/logout", &refreshed)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_with_token("/api/logout", &refreshed)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "ACCOUNT_NOT_FOUND");
}

#[tokio::test]
async fn test_validate_token_without_query_is_outcome() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/validate-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["messages"][0].as_str().unwrap().contains("accessToken"));
    assert!(body.get("payload").is_none());
}

#[tokio::test]
async fn test_login_with_malformed_body_is_outcome() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({ "email": 1 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_REQUEST");

    let response = app
        .post("/api/register")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BAD_REQUEST");
}
