//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer token configuration shared with the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT verification (HMAC-SHA256). Empty until configured;
    /// the server refuses to start without one.
    #[serde(default)]
    pub jwt_secret: String,
    /// Allowed clock skew in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Access token TTL in minutes for locally minted tokens.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            leeway_seconds: default_leeway(),
            access_ttl_minutes: default_access_ttl(),
        }
    }
}

fn default_leeway() -> u64 {
    5
}

fn default_access_ttl() -> u64 {
    15
}
