//! Link issuance: mints a share link for an authenticated owner.

use std::sync::Arc;

use tracing::info;

use linkvault_core::error::AppError;

use crate::context::RequestContext;

use super::store::ShareLinkStore;

/// Issues new share links.
///
/// Ownership of the resource is not checked here; the resource service owns
/// that relation and the wrapped key is useless without the link secret.
#[derive(Debug, Clone)]
pub struct IssuanceService {
    /// Share link store.
    store: Arc<ShareLinkStore>,
}

impl IssuanceService {
    /// Creates a new issuance service.
    pub fn new(store: Arc<ShareLinkStore>) -> Self {
        Self { store }
    }

    /// Persists a new link for `resource_id` and returns its share id.
    ///
    /// Both values are stored verbatim. Fails with a validation error,
    /// writing nothing, when either is empty.
    pub async fn issue(
        &self,
        ctx: &RequestContext,
        resource_id: &str,
        wrapped_key: &str,
    ) -> Result<String, AppError> {
        if resource_id.trim().is_empty() || wrapped_key.trim().is_empty() {
            return Err(AppError::validation("Missing file_id or wrapped_key"));
        }

        let share_id = self
            .store
            .create(resource_id, &ctx.caller_id, wrapped_key)
            .await?;

        info!(
            owner_id = %ctx.caller_id,
            file_id = %resource_id,
            ttl_seconds = self.store.ttl().as_secs(),
            "Share link issued"
        );

        Ok(share_id)
    }
}
