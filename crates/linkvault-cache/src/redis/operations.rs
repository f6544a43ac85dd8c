//! Redis store provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing::debug;

use linkvault_core::error::{AppError, ErrorKind};
use linkvault_core::result::AppResult;
use linkvault_core::traits::kv::{Fields, KvStore, Multi, TxCommand, TxOutcome, WatchedKey};

use super::client::RedisClient;

/// Map a Redis error to an AppError.
fn map_err(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
}

/// TTL in whole seconds as Redis expects it.
fn ttl_secs(ttl: Duration) -> AppResult<i64> {
    i64::try_from(ttl.as_secs())
        .map_err(|_| AppError::store(format!("TTL of {}s is out of range", ttl.as_secs())))
}

fn field_pairs(fields: &Fields) -> Vec<(&str, &str)> {
    fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Redis-backed key-value store.
#[derive(Debug, Clone)]
pub struct RedisKvStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisKvStore {
    /// Create a new Redis store provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn hash_set(&self, key: &str, fields: &Fields) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .hset_multiple(&full_key, &field_pairs(fields))
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn hash_set_with_ttl(&self, key: &str, fields: &Fields, ttl: Duration) -> AppResult<()> {
        if fields.is_empty() {
            return Err(AppError::store("Refusing to write an empty record"));
        }
        let seconds = ttl_secs(ttl)?;
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        // HSET + EXPIRE inside MULTI so the record never exists without a TTL.
        let _: () = redis::pipe()
            .atomic()
            .hset_multiple(&full_key, &field_pairs(fields))
            .ignore()
            .expire(&full_key, seconds)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> AppResult<Fields> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Fields = conn.hgetall(&full_key).await.map_err(map_err)?;
        Ok(result)
    }

    async fn hash_get_field(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.hget(&full_key, field).await.map_err(map_err)?;
        Ok(result)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn
            .expire(&full_key, ttl_secs(ttl)?)
            .await
            .map_err(map_err)?;
        Ok(result)
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        // -2 = absent, -1 = no expiry.
        let millis: i64 = conn.pttl(&full_key).await.map_err(map_err)?;
        Ok((millis >= 0).then(|| Duration::from_millis(millis as u64)))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(map_err)?;
        Ok(result)
    }

    async fn watch(&self, key: &str) -> AppResult<Box<dyn WatchedKey>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.dedicated_connection().await?;

        let _: () = redis::cmd("WATCH")
            .arg(&full_key)
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;

        Ok(Box::new(RedisWatchedKey {
            conn,
            key: key.to_string(),
            full_key,
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(pong == "PONG")
    }
}

/// A key watched on its own connection.
struct RedisWatchedKey {
    /// Connection carrying the `WATCH`; dropped after `EXEC`/`UNWATCH`.
    conn: MultiplexedConnection,
    /// Un-prefixed key.
    key: String,
    /// Key as stored in Redis.
    full_key: String,
}

#[async_trait]
impl WatchedKey for RedisWatchedKey {
    async fn hash_get_field(&mut self, field: &str) -> AppResult<Option<String>> {
        let result: Option<String> = self
            .conn
            .hget(&self.full_key, field)
            .await
            .map_err(map_err)?;
        Ok(result)
    }

    async fn execute(self: Box<Self>, multi: Multi) -> AppResult<TxOutcome> {
        let mut this = *self;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for command in multi.commands() {
            match command {
                TxCommand::HashGetAll => {
                    pipe.hgetall(&this.full_key);
                }
                TxCommand::HashSet { field, value } => {
                    pipe.hset(&this.full_key, field, value).ignore();
                }
            }
        }

        // A nil EXEC reply means the watched key was touched by someone else.
        let replies: Option<Vec<Fields>> =
            pipe.query_async(&mut this.conn).await.map_err(map_err)?;

        match replies {
            Some(replies) => Ok(TxOutcome::Committed(replies)),
            None => {
                debug!(key = %this.key, "Redis transaction aborted by concurrent write");
                Ok(TxOutcome::Aborted)
            }
        }
    }

    async fn unwatch(self: Box<Self>) -> AppResult<()> {
        let mut this = *self;
        let _: () = redis::cmd("UNWATCH")
            .query_async(&mut this.conn)
            .await
            .map_err(map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_secs_in_range() {
        assert_eq!(ttl_secs(Duration::from_secs(86_400)).unwrap(), 86_400);
    }

    #[test]
    fn test_ttl_secs_rejects_overflow() {
        let err = ttl_secs(Duration::from_secs(u64::MAX)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
    }
}
