//! Key builders for every record LinkVault writes.
//!
//! Centralising key construction prevents typos and keeps the layout
//! readable by other services sharing the store.

/// Namespace of share link records.
pub const SHARE_NAMESPACE: &str = "share";

/// Key of the hash record holding one share link.
pub fn share_link(share_id: &str) -> String {
    format!("{SHARE_NAMESPACE}:{share_id}")
}
