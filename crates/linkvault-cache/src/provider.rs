//! Store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use linkvault_core::config::store::StoreConfig;
use linkvault_core::error::AppError;
use linkvault_core::result::AppResult;
use linkvault_core::traits::kv::{Fields, KvStore, WatchedKey};

/// Store manager that wraps the configured key-value backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store backend.
    inner: Arc<dyn KvStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KvStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis store provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisKvStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    max_entries = config.memory.max_entries,
                    "Initializing in-memory store provider"
                );
                Arc::new(crate::memory::MemoryKvStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing backend (for testing).
    pub fn from_store(store: Arc<dyn KvStore>) -> Self {
        Self { inner: store }
    }
}

#[async_trait]
impl KvStore for StoreManager {
    async fn hash_set(&self, key: &str, fields: &Fields) -> AppResult<()> {
        self.inner.hash_set(key, fields).await
    }

    async fn hash_set_with_ttl(&self, key: &str, fields: &Fields, ttl: Duration) -> AppResult<()> {
        self.inner.hash_set_with_ttl(key, fields, ttl).await
    }

    async fn hash_get_all(&self, key: &str) -> AppResult<Fields> {
        self.inner.hash_get_all(key).await
    }

    async fn hash_get_field(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        self.inner.hash_get_field(key, field).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        self.inner.ttl(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn watch(&self, key: &str) -> AppResult<Box<dyn WatchedKey>> {
        self.inner.watch(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
