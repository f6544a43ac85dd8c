//! Response DTOs.

use serde::{Deserialize, Serialize};

use linkvault_service::share::ShareLinkData;

/// Body of a successful `POST /access/link/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    /// Identifier to embed in the share URL.
    pub share_id: String,
}

/// Body of a successful `GET /access/link/details/{share_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDetailsResponse {
    /// Resource id.
    pub file_id: String,
    /// Wrapped content key, byte-identical to what was submitted.
    pub wrapped_key: String,
}

impl From<ShareLinkData> for LinkDetailsResponse {
    fn from(data: ShareLinkData) -> Self {
        Self {
            file_id: data.file_id,
            wrapped_key: data.wrapped_key,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Store connectivity.
    pub store: String,
}
