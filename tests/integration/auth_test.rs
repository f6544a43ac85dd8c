//! Integration tests for bearer authentication on link creation.

use axum::http::StatusCode;
use serde_json::json;

use linkvault_auth::jwt::encoder::JwtEncoder;
use linkvault_core::config::AuthConfig;

use crate::helpers::TestApp;

fn body() -> serde_json::Value {
    json!({ "file_id": "f1", "wrapped_key": "k1" })
}

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/access/link/create", Some(body()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_create_with_foreign_token_is_unauthorized() {
    let app = TestApp::new();
    let foreign = AuthConfig {
        jwt_secret: "someone-elses-secret".to_string(),
        ..AuthConfig::default()
    };
    let (token, _) = JwtEncoder::new(&foreign).issue_access_token("42").unwrap();

    let response = app
        .request("POST", "/access/link/create", Some(body()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_with_expired_token_is_unauthorized() {
    let app = TestApp::new();
    let (token, _) = JwtEncoder::new(&app.config.auth)
        .issue_token_expiring("42", chrono::Duration::minutes(-30))
        .unwrap();

    let response = app
        .request("POST", "/access/link/create", Some(body()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_redemption_needs_no_token() {
    let app = TestApp::new();
    let share_id = app.create_link(json!("f1"), "k1").await;
    let response = app
        .request("GET", &format!("/access/link/details/{share_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

