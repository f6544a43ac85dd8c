//! Integration tests for the health probe and store-failure mapping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;

use linkvault_core::error::AppError;
use linkvault_core::result::AppResult;
use linkvault_core::traits::kv::{Fields, KvStore, WatchedKey};

use crate::helpers::TestApp;

/// Backend that behaves like an unreachable Redis.
#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl KvStore for UnreachableStore {
    async fn hash_set(&self, _: &str, _: &Fields) -> AppResult<()> {
        Err(AppError::store("connection refused"))
    }
    async fn hash_set_with_ttl(&self, _: &str, _: &Fields, _: Duration) -> AppResult<()> {
        Err(AppError::store("connection refused"))
    }
    async fn hash_get_all(&self, _: &str) -> AppResult<Fields> {
        Err(AppError::store("connection refused"))
    }
    async fn hash_get_field(&self, _: &str, _: &str) -> AppResult<Option<String>> {
        Err(AppError::store("connection refused"))
    }
    async fn expire(&self, _: &str, _: Duration) -> AppResult<bool> {
        Err(AppError::store("connection refused"))
    }
    async fn ttl(&self, _: &str) -> AppResult<Option<Duration>> {
        Err(AppError::store("connection refused"))
    }
    async fn exists(&self, _: &str) -> AppResult<bool> {
        Err(AppError::store("connection refused"))
    }
    async fn watch(&self, _: &str) -> AppResult<Box<dyn WatchedKey>> {
        Err(AppError::store("connection refused"))
    }
    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::store("connection refused"))
    }
}

#[tokio::test]
async fn test_health_ok_with_memory_store() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "connected");
}

#[tokio::test]
async fn test_health_unavailable_when_store_down() {
    let app = TestApp::with_backend(Arc::new(UnreachableStore));
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_store_failure_is_server_error_not_404() {
    let app = TestApp::with_backend(Arc::new(UnreachableStore));

    let response = app
        .request("GET", "/access/link/details/some-id", None, None)
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["msg"], "Internal server error");

    let token = app.token_for("42");
    let response = app
        .request(
            "POST",
            "/access/link/create",
            Some(serde_json::json!({ "file_id": "f1", "wrapped_key": "k1" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
