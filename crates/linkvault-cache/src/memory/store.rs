//! In-memory key-value store using dashmap.
//!
//! Every write stamps the record with a fresh version from a global
//! counter. A watch remembers the version it saw (or that the key was
//! absent) and the commit compares it under the shard lock, which gives the
//! same abort semantics as Redis `WATCH`: any write, expiry, or re-creation
//! of the key between watch and commit aborts the transaction.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use linkvault_core::config::store::MemoryStoreConfig;
use linkvault_core::error::AppError;
use linkvault_core::result::AppResult;
use linkvault_core::traits::kv::{Fields, KvStore, Multi, TxCommand, TxOutcome, WatchedKey};

/// One hash record.
#[derive(Debug, Clone)]
struct Record {
    fields: Fields,
    version: u64,
    deadline: Option<Instant>,
}

impl Record {
    fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }
}

fn deadline_after(now: Instant, ttl: Duration) -> AppResult<Instant> {
    now.checked_add(ttl)
        .ok_or_else(|| AppError::store(format!("TTL of {}s is out of range", ttl.as_secs())))
}

/// Shared state behind every handle of the store.
#[derive(Debug)]
struct Inner {
    records: DashMap<String, Record>,
    next_version: AtomicU64,
    max_entries: usize,
}

impl Inner {
    fn bump(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Drop `key` if its TTL has elapsed.
    fn purge_expired(&self, key: &str, now: Instant) {
        if self.records.remove_if(key, |_, r| r.is_expired(now)).is_some() {
            debug!(key, "Purged expired record");
        }
    }

    /// Drop every record whose TTL has elapsed.
    fn sweep_expired(&self, now: Instant) {
        let before = self.records.len();
        self.records.retain(|_, r| !r.is_expired(now));
        let removed = before.saturating_sub(self.records.len());
        if removed > 0 {
            debug!(removed, "Swept expired records");
        }
    }

    fn live_version(&self, key: &str) -> Option<u64> {
        let now = Instant::now();
        self.purge_expired(key, now);
        self.records
            .get(key)
            .filter(|r| !r.is_expired(now))
            .map(|r| r.version)
    }

    fn live_field(&self, key: &str, field: &str) -> Option<String> {
        let now = Instant::now();
        self.purge_expired(key, now);
        self.records
            .get(key)
            .filter(|r| !r.is_expired(now))
            .and_then(|r| r.fields.get(field).cloned())
    }

    fn upsert(&self, key: &str, fields: &Fields, ttl: Option<Duration>) -> AppResult<()> {
        let now = Instant::now();
        self.purge_expired(key, now);

        if !self.records.contains_key(key) && self.records.len() >= self.max_entries {
            self.sweep_expired(now);
            if self.records.len() >= self.max_entries {
                return Err(AppError::store(format!(
                    "Memory store is full ({} records)",
                    self.max_entries
                )));
            }
        }

        let deadline = ttl.map(|ttl| deadline_after(now, ttl)).transpose()?;
        let version = self.bump();
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.fields.extend(fields.clone());
                record.version = version;
                if deadline.is_some() {
                    record.deadline = deadline;
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Record {
                    fields: fields.clone(),
                    version,
                    deadline,
                });
            }
        }
        Ok(())
    }
}

/// In-memory store provider for single-node deployments and tests.
#[derive(Debug, Clone)]
pub struct MemoryKvStore {
    inner: Arc<Inner>,
}

impl MemoryKvStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: DashMap::new(),
                next_version: AtomicU64::new(0),
                max_entries: config.max_entries,
            }),
        }
    }

    /// Number of records physically held, including not-yet-purged expired ones.
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    /// Whether no records are held.
    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new(&MemoryStoreConfig::default())
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn hash_set(&self, key: &str, fields: &Fields) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        self.inner.upsert(key, fields, None)
    }

    async fn hash_set_with_ttl(&self, key: &str, fields: &Fields, ttl: Duration) -> AppResult<()> {
        if fields.is_empty() {
            return Err(AppError::store("Refusing to write an empty record"));
        }
        self.inner.upsert(key, fields, Some(ttl))
    }

    async fn hash_get_all(&self, key: &str) -> AppResult<Fields> {
        let now = Instant::now();
        self.inner.purge_expired(key, now);
        Ok(self
            .inner
            .records
            .get(key)
            .filter(|r| !r.is_expired(now))
            .map(|r| r.fields.clone())
            .unwrap_or_default())
    }

    async fn hash_get_field(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        Ok(self.inner.live_field(key, field))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        self.inner.purge_expired(key, now);
        let deadline = deadline_after(now, ttl)?;
        match self.inner.records.get_mut(key) {
            Some(mut record) => {
                record.deadline = Some(deadline);
                record.version = self.inner.bump();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        let now = Instant::now();
        self.inner.purge_expired(key, now);
        Ok(self
            .inner
            .records
            .get(key)
            .and_then(|r| r.deadline)
            .map(|deadline| deadline.saturating_duration_since(now)))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.inner.live_version(key).is_some())
    }

    async fn watch(&self, key: &str) -> AppResult<Box<dyn WatchedKey>> {
        Ok(Box::new(MemoryWatchedKey {
            inner: Arc::clone(&self.inner),
            key: key.to_string(),
            watched_version: self.inner.live_version(key),
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Watch handle remembering the version observed at watch time.
struct MemoryWatchedKey {
    inner: Arc<Inner>,
    key: String,
    /// `None` when the key was absent at watch time.
    watched_version: Option<u64>,
}

/// Run queued commands against `fields`, returning read replies and whether anything was written.
fn apply(commands: &[TxCommand], fields: &mut Fields) -> (Vec<Fields>, bool) {
    let mut replies = Vec::new();
    let mut wrote = false;
    for command in commands {
        match command {
            TxCommand::HashGetAll => replies.push(fields.clone()),
            TxCommand::HashSet { field, value } => {
                fields.insert(field.clone(), value.clone());
                wrote = true;
            }
        }
    }
    (replies, wrote)
}

#[async_trait]
impl WatchedKey for MemoryWatchedKey {
    async fn hash_get_field(&mut self, field: &str) -> AppResult<Option<String>> {
        Ok(self.inner.live_field(&self.key, field))
    }

    async fn execute(self: Box<Self>, multi: Multi) -> AppResult<TxOutcome> {
        let now = Instant::now();

        // The entry guard holds the shard lock until the commit is applied.
        match self.inner.records.entry(self.key.clone()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.remove();
                    debug!(key = %self.key, "Transaction aborted: record expired under watch");
                    return Ok(TxOutcome::Aborted);
                }
                if Some(occupied.get().version) != self.watched_version {
                    debug!(key = %self.key, "Transaction aborted by concurrent write");
                    return Ok(TxOutcome::Aborted);
                }
                let record = occupied.get_mut();
                let (replies, wrote) = apply(multi.commands(), &mut record.fields);
                if wrote {
                    record.version = self.inner.bump();
                }
                Ok(TxOutcome::Committed(replies))
            }
            Entry::Vacant(vacant) => {
                if self.watched_version.is_some() {
                    debug!(key = %self.key, "Transaction aborted: record vanished under watch");
                    return Ok(TxOutcome::Aborted);
                }
                let mut fields = Fields::new();
                let (replies, wrote) = apply(multi.commands(), &mut fields);
                if wrote {
                    vacant.insert(Record {
                        fields,
                        version: self.inner.bump(),
                        deadline: None,
                    });
                }
                Ok(TxOutcome::Committed(replies))
            }
        }
    }

    async fn unwatch(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}
