//! Integration tests for link creation and one-time redemption.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use linkvault_core::traits::kv::KvStore;

use crate::helpers::TestApp;

const UNAVAILABLE: &str = "Link is invalid, expired, or has already been used";

fn details_path(share_id: &str) -> String {
    format!("/access/link/details/{share_id}")
}

#[tokio::test]
async fn test_create_then_redeem_round_trip() {
    let app = TestApp::new();
    let wrapped_key = "AAECAwQFBgcICQ==+/\u{00fc}";
    let share_id = app.create_link(json!("file-123-abc"), wrapped_key).await;

    let response = app.request("GET", &details_path(&share_id), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["file_id"], "file-123-abc");
    assert_eq!(response.body["wrapped_key"], wrapped_key);
}

#[tokio::test]
async fn test_integer_file_id_comes_back_as_string() {
    let app = TestApp::new();
    let share_id = app.create_link(json!(123), "k").await;

    let response = app.request("GET", &details_path(&share_id), None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["file_id"], "123");
}

#[tokio::test]
async fn test_second_redemption_is_not_found() {
    let app = TestApp::new();
    let share_id = app.create_link(json!("f1"), "k1").await;

    let first = app.request("GET", &details_path(&share_id), None, None).await;
    assert_eq!(first.status, StatusCode::OK);

    for _ in 0..3 {
        let again = app.request("GET", &details_path(&share_id), None, None).await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
        assert_eq!(again.body["error"], "NOT_FOUND");
        assert_eq!(again.body["msg"], UNAVAILABLE);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redemptions_single_success() {
    let app = TestApp::new();
    let share_id = app.create_link(json!("f1"), "k1").await;
    let app = std::sync::Arc::new(app);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        let path = details_path(&share_id);
        handles.push(tokio::spawn(async move {
            app.request("GET", &path, None, None).await.status
        }));
    }

    let mut ok = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::NOT_FOUND => not_found += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(not_found, 19);
}

#[tokio::test(start_paused = true)]
async fn test_expired_link_is_not_found_and_purged() {
    let app = TestApp::new();
    let share_id = app.create_link(json!("f1"), "k1").await;

    tokio::time::advance(Duration::from_secs(86_401)).await;

    let response = app.request("GET", &details_path(&share_id), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["msg"], UNAVAILABLE);

    let key = format!("share:{share_id}");
    assert!(!app.store.exists(&key).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_not_found_bodies_are_identical() {
    let app = TestApp::new();

    let never = app.request("GET", &details_path("never-issued"), None, None).await;

    let used_id = app.create_link(json!("f1"), "k1").await;
    app.request("GET", &details_path(&used_id), None, None).await;
    let used = app.request("GET", &details_path(&used_id), None, None).await;

    let expired_id = app.create_link(json!("f2"), "k2").await;
    tokio::time::advance(Duration::from_secs(86_401)).await;
    let expired = app.request("GET", &details_path(&expired_id), None, None).await;

    for response in [&never, &used, &expired] {
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
    assert_eq!(never.raw, used.raw);
    assert_eq!(never.raw, expired.raw);
}

#[tokio::test]
async fn test_missing_fields_rejected_without_write() {
    let app = TestApp::new();
    let token = app.token_for("42");

    let bodies = [
        json!({ "wrapped_key": "k" }),
        json!({ "file_id": "f" }),
        json!({ "file_id": "", "wrapped_key": "k" }),
        json!({ "file_id": "f", "wrapped_key": "" }),
        json!({}),
    ];
    for body in bodies {
        let response = app
            .request("POST", "/access/link/create", Some(body), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["msg"], "Missing file_id or wrapped_key");
    }
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = TestApp::new();
    let token = app.token_for("42");

    let response = app
        .request_raw("POST", "/access/link/create", "{not json".to_string(), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
    assert!(response.body["msg"].is_string());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_each_create_gets_a_distinct_id() {
    let app = TestApp::new();
    let a = app.create_link(json!("f1"), "k1").await;
    let b = app.create_link(json!("f1"), "k1").await;
    assert_ne!(a, b);
    assert_eq!(app.store.len(), 2);
}
