//! Redis connection management.

use redis::Client;
use redis::aio::{ConnectionManager, MultiplexedConnection};
use tracing::info;

use linkvault_core::config::store::RedisStoreConfig;
use linkvault_core::error::{AppError, ErrorKind};
use linkvault_core::result::AppResult;

/// Redis client wrapper with connection management.
#[derive(Debug, Clone)]
pub struct RedisClient {
    /// Client used to open dedicated connections for transactions.
    client: Client,
    /// Shared connection manager (multiplexed, reconnecting).
    conn: ConnectionManager,
    /// Key prefix for all keys.
    key_prefix: String,
}

impl RedisClient {
    /// Create a new Redis client from configuration.
    pub async fn connect(config: &RedisStoreConfig) -> AppResult<Self> {
        info!(url = %mask_redis_url(&config.url), "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client.clone()).await.map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to connect to Redis", e)
        })?;

        info!("Successfully connected to Redis");
        Ok(Self {
            client,
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Get a mutable clone of the shared connection manager.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Open a connection owned by a single transaction.
    ///
    /// `WATCH` state lives on the server-side connection, so it must not be
    /// shared with the multiplexed manager that serves other requests.
    pub async fn dedicated_connection(&self) -> AppResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Store, "Failed to open Redis connection", e)
            })
    }

    /// Build a full key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}

/// Mask password in Redis URL for safe logging.
fn mask_redis_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
