//! Link redemption: hands the wrapped key to the first redeemer only.

use std::sync::Arc;

use tracing::{debug, info};

use linkvault_core::error::AppError;

use super::record::ShareLinkData;
use super::store::{Redemption, ShareLinkStore};

/// The single message for absent, expired, and consumed links.
pub const LINK_UNAVAILABLE: &str = "Link is invalid, expired, or has already been used";

/// Longest share id worth asking the store about.
const MAX_SHARE_ID_LEN: usize = 128;

/// Redeems share links for unauthenticated recipients.
#[derive(Debug, Clone)]
pub struct RedemptionService {
    /// Share link store.
    store: Arc<ShareLinkStore>,
}

impl RedemptionService {
    /// Creates a new redemption service.
    pub fn new(store: Arc<ShareLinkStore>) -> Self {
        Self { store }
    }

    /// Consumes the link and returns its payload.
    ///
    /// Never-existed, expired, consumed, and lost-race outcomes all yield the
    /// same not-found error. Store failures propagate unmasked.
    pub async fn redeem(&self, share_id: &str) -> Result<ShareLinkData, AppError> {
        if share_id.is_empty() || share_id.len() > MAX_SHARE_ID_LEN {
            return Err(AppError::not_found(LINK_UNAVAILABLE));
        }

        match self.store.redeem(share_id).await? {
            Redemption::Redeemed(link) => {
                info!(
                    owner_id = %link.owner_id,
                    file_id = %link.resource_id,
                    "Share link redeemed"
                );
                Ok(link.into_data())
            }
            Redemption::Unavailable(reason) => {
                debug!(?reason, "Share link unavailable");
                Err(AppError::not_found(LINK_UNAVAILABLE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use linkvault_cache::memory::MemoryKvStore;
    use linkvault_core::config::ShareConfig;
    use linkvault_core::error::ErrorKind;

    fn make_store() -> Arc<ShareLinkStore> {
        Arc::new(ShareLinkStore::new(
            Arc::new(MemoryKvStore::default()),
            &ShareConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_redeem_returns_exact_payload() {
        let store = make_store();
        let wrapped_key = "base64+/=key==\u{00e9}";
        let share_id = store.create("file-123-abc", "1", wrapped_key).await.unwrap();

        let service = RedemptionService::new(store);
        let data = service.redeem(&share_id).await.unwrap();
        assert_eq!(data.file_id, "file-123-abc");
        assert_eq!(data.wrapped_key, wrapped_key);
    }

    #[tokio::test]
    async fn test_unavailable_outcomes_share_one_error() {
        let store = make_store();
        let share_id = store.create("f1", "1", "k1").await.unwrap();
        let service = RedemptionService::new(store);
        service.redeem(&share_id).await.unwrap();

        let used = service.redeem(&share_id).await.unwrap_err();
        let unknown = service.redeem("never-issued").await.unwrap_err();
        let oversized = service.redeem(&"x".repeat(500)).await.unwrap_err();

        for err in [&used, &unknown, &oversized] {
            assert_eq!(err.kind, ErrorKind::NotFound);
            assert_eq!(err.message, LINK_UNAVAILABLE);
        }
    }
}
