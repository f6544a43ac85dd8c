//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use linkvault_api::{build_app, build_state};
use linkvault_auth::jwt::encoder::JwtEncoder;
use linkvault_cache::memory::MemoryKvStore;
use linkvault_cache::provider::StoreManager;
use linkvault_core::config::AppConfig;
use linkvault_core::traits::kv::KvStore;

/// Secret shared by the test token issuer and the app under test.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle on the backing store
    pub store: MemoryKvStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a fresh memory store
    pub fn new() -> Self {
        let store = MemoryKvStore::default();
        Self::with_store(Arc::new(store.clone()), store)
    }

    /// Create a test application over an arbitrary backend
    pub fn with_backend(backend: Arc<dyn KvStore>) -> Self {
        Self::with_store(backend, MemoryKvStore::default())
    }

    fn with_store(backend: Arc<dyn KvStore>, store: MemoryKvStore) -> Self {
        let mut config = AppConfig::default();
        config.store.provider = "memory".to_string();
        config.auth.jwt_secret = TEST_SECRET.to_string();

        let state = build_state(config.clone(), StoreManager::from_store(backend));
        let router = build_app(state);

        Self {
            router,
            store,
            config,
        }
    }

    /// Issue an access token for `caller_id`
    pub fn token_for(&self, caller_id: &str) -> String {
        let (token, _) = JwtEncoder::new(&self.config.auth)
            .issue_access_token(caller_id)
            .expect("Failed to issue token");
        token
    }

    /// Create a link as caller 42 and return its share id
    pub async fn create_link(&self, file_id: Value, wrapped_key: &str) -> String {
        let token = self.token_for("42");
        let response = self
            .request(
                "POST",
                "/access/link/create",
                Some(serde_json::json!({ "file_id": file_id, "wrapped_key": wrapped_key })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["share_id"]
            .as_str()
            .expect("share_id missing")
            .to_string()
    }

    /// Make a JSON request to the app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, token).await
    }

    /// Make a request with a raw body string
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            raw: body_bytes.to_vec(),
        }
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Body bytes as sent
    pub raw: Vec<u8>,
}
