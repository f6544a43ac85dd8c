//! Key-value store contract for pluggable backends.
//!
//! The store holds hash records with optional expiry and offers one
//! optimistic-concurrency primitive: [`KvStore::watch`] a single key, read
//! through the returned [`WatchedKey`], then [`WatchedKey::execute`] a
//! queued [`Multi`]. The commit is refused with [`TxOutcome::Aborted`] if
//! anyone wrote, deleted, or expired the key after the watch began.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Field map of a single hash record.
pub type Fields = HashMap<String, String>;

/// Trait for key-value backends (Redis or in-memory).
///
/// Keys are passed un-prefixed; the backend applies any deployment prefix.
/// A key whose TTL has elapsed behaves as absent for every operation.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug + 'static {
    /// Upsert multiple fields of one record atomically.
    async fn hash_set(&self, key: &str, fields: &Fields) -> AppResult<()>;

    /// Upsert fields and set the record's TTL as a single atomic unit.
    async fn hash_set_with_ttl(&self, key: &str, fields: &Fields, ttl: Duration) -> AppResult<()>;

    /// Get every field of a record. Returns an empty map if the key is absent.
    async fn hash_get_all(&self, key: &str) -> AppResult<Fields>;

    /// Get one field of a record.
    async fn hash_get_field(&self, key: &str, field: &str) -> AppResult<Option<String>>;

    /// Set or refresh the TTL of a key. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Remaining TTL of a key; `None` if the key is absent or has no expiry.
    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Begin an optimistic-concurrency transaction on `key`.
    async fn watch(&self, key: &str) -> AppResult<Box<dyn WatchedKey>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// A key under watch, owned by exactly one transaction.
///
/// Dropping a `WatchedKey` without calling [`execute`](Self::execute) or
/// [`unwatch`](Self::unwatch) releases it without applying anything.
#[async_trait]
pub trait WatchedKey: Send {
    /// Read one field of the watched record.
    async fn hash_get_field(&mut self, field: &str) -> AppResult<Option<String>>;

    /// Commit the queued commands against the watched key as one unit.
    async fn execute(self: Box<Self>, multi: Multi) -> AppResult<TxOutcome>;

    /// Release the watch without committing.
    async fn unwatch(self: Box<Self>) -> AppResult<()>;
}

/// A command queued inside a transaction. Every command targets the watched key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxCommand {
    /// Read the full record; produces one reply.
    HashGetAll,
    /// Write one field; produces no reply.
    HashSet {
        /// Field name.
        field: String,
        /// New value.
        value: String,
    },
}

/// Commands staged between watch and commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multi {
    commands: Vec<TxCommand>,
}

impl Multi {
    /// Start an empty command queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full-record read.
    pub fn hash_get_all(mut self) -> Self {
        self.commands.push(TxCommand::HashGetAll);
        self
    }

    /// Queue a single-field write.
    pub fn hash_set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.commands.push(TxCommand::HashSet {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// The queued commands in submission order.
    pub fn commands(&self) -> &[TxCommand] {
        &self.commands
    }

    /// Number of queued commands that produce a reply.
    pub fn read_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, TxCommand::HashGetAll))
            .count()
    }

    /// Whether nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Result of committing a [`Multi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    /// All commands were applied. Holds one map per queued read, in order.
    Committed(Vec<Fields>),
    /// The watched key changed since the watch began; nothing was applied.
    Aborted,
}

impl TxOutcome {
    /// Whether the transaction was applied.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
