//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Share link lifetime and store round-trip limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Lifetime of an unredeemed link in seconds. Not refreshed on read.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Deadline for a single store round trip in milliseconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_ms: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            store_timeout_ms: default_store_timeout(),
        }
    }
}

fn default_ttl() -> u64 {
    86_400
}

fn default_store_timeout() -> u64 {
    2_000
}
