//! Share link persistence and the one-time redemption protocol.
//!
//! Redemption is a check-and-invalidate over the store's optimistic
//! transaction:
//!
//! 1. `WATCH share:<id>`
//! 2. read `valid`; anything but `"true"` ends the attempt (no mutation)
//! 3. queue `HGETALL` + `HSET valid false`
//! 4. `EXEC`; an abort means another redeemer committed first
//!
//! Exactly one caller can reach a committed `EXEC` for a given link. There
//! is no retry after an abort: losing the race is reported the same way as
//! a consumed link.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use linkvault_cache::keys;
use linkvault_core::config::ShareConfig;
use linkvault_core::error::AppError;
use linkvault_core::result::AppResult;
use linkvault_core::traits::kv::{KvStore, Multi, TxOutcome};

use super::link::generate_share_id;
use super::record::{FIELD_VALID, ShareLink, decode_valid, encode_valid};

/// Result of a redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// This caller consumed the link. Holds the record as read inside the transaction.
    Redeemed(ShareLink),
    /// Nothing may be returned. The reason is for logs only.
    Unavailable(UnavailableReason),
}

/// Why a redemption returned nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Absent, expired, or already consumed when first read.
    NeverValid,
    /// Another party modified the record between watch and commit.
    LostRace,
    /// The commit landed but the record held no usable data.
    Vanished,
}

/// Maps share ids to link records in the key-value store.
#[derive(Debug, Clone)]
pub struct ShareLinkStore {
    /// Backing store.
    kv: Arc<dyn KvStore>,
    /// Lifetime of a fresh link.
    ttl: Duration,
    /// Deadline for each store round trip.
    timeout: Duration,
}

impl ShareLinkStore {
    /// Creates a new share link store.
    pub fn new(kv: Arc<dyn KvStore>, config: &ShareConfig) -> Self {
        Self {
            kv,
            ttl: Duration::from_secs(config.ttl_seconds),
            timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }

    /// Lifetime applied to new links.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Persists a fresh valid link and returns its id.
    pub async fn create(
        &self,
        resource_id: &str,
        owner_id: &str,
        wrapped_key: &str,
    ) -> AppResult<String> {
        let link = ShareLink {
            share_id: generate_share_id(),
            resource_id: resource_id.to_string(),
            owner_id: owner_id.to_string(),
            wrapped_key: wrapped_key.to_string(),
            valid: true,
        };

        let key = keys::share_link(&link.share_id);
        self.bounded(
            "create",
            self.kv.hash_set_with_ttl(&key, &link.to_fields(), self.ttl),
        )
        .await?;

        Ok(link.share_id)
    }

    /// Atomically checks validity and invalidates the link.
    pub async fn redeem(&self, share_id: &str) -> AppResult<Redemption> {
        let key = keys::share_link(share_id);

        let mut watched = self.bounded("watch", self.kv.watch(&key)).await?;

        let valid = self
            .bounded("read", watched.hash_get_field(FIELD_VALID))
            .await?;
        if !decode_valid(valid.as_deref()) {
            if let Err(e) = self.bounded("unwatch", watched.unwatch()).await {
                warn!(error = %e, "Failed to release watch; connection will be dropped");
            }
            return Ok(Redemption::Unavailable(UnavailableReason::NeverValid));
        }

        let multi = Multi::new()
            .hash_get_all()
            .hash_set(FIELD_VALID, encode_valid(false));

        match self.bounded("commit", watched.execute(multi)).await? {
            TxOutcome::Aborted => Ok(Redemption::Unavailable(UnavailableReason::LostRace)),
            TxOutcome::Committed(replies) => {
                let fields = replies.into_iter().next().unwrap_or_default();
                match ShareLink::from_fields(share_id, &fields) {
                    Some(link) if link.valid => Ok(Redemption::Redeemed(link)),
                    _ => {
                        debug!(fields = fields.len(), "Committed read held no usable link");
                        Ok(Redemption::Unavailable(UnavailableReason::Vanished))
                    }
                }
            }
        }
    }

    /// Runs one store round trip under the configured deadline.
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                AppError::store(format!(
                    "Store {op} timed out after {}ms",
                    self.timeout.as_millis()
                ))
            })?
    }
}
