//! Share link record and its hash-field encoding.
//!
//! Stored layout under `share:{share_id}`:
//!
//! | field         | value                          |
//! |---------------|--------------------------------|
//! | `file_id`     | opaque resource id             |
//! | `owner_id`    | caller id of the creator       |
//! | `wrapped_key` | opaque content-key ciphertext  |
//! | `valid`       | `"true"` / `"false"` literal   |

use serde::{Deserialize, Serialize};

use linkvault_core::traits::kv::Fields;

/// Field holding the protected resource id.
pub const FIELD_FILE_ID: &str = "file_id";
/// Field holding the creator's caller id.
pub const FIELD_OWNER_ID: &str = "owner_id";
/// Field holding the wrapped content key.
pub const FIELD_WRAPPED_KEY: &str = "wrapped_key";
/// Field holding the one-time validity flag.
pub const FIELD_VALID: &str = "valid";

/// Encode the validity flag as stored.
pub fn encode_valid(valid: bool) -> &'static str {
    if valid { "true" } else { "false" }
}

/// Decode the validity flag. Only the exact literal `"true"` is valid.
pub fn decode_valid(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// One share link as held in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Lookup identifier.
    pub share_id: String,
    /// Protected resource (file) id.
    pub resource_id: String,
    /// Caller id of the creator.
    pub owner_id: String,
    /// Content key wrapped under the link secret.
    pub wrapped_key: String,
    /// True until the first successful redemption.
    pub valid: bool,
}

impl ShareLink {
    /// Encode as hash fields.
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            (FIELD_FILE_ID.to_string(), self.resource_id.clone()),
            (FIELD_OWNER_ID.to_string(), self.owner_id.clone()),
            (FIELD_WRAPPED_KEY.to_string(), self.wrapped_key.clone()),
            (FIELD_VALID.to_string(), encode_valid(self.valid).to_string()),
        ])
    }

    /// Decode from hash fields. Returns `None` when the record is empty or
    /// lacks the resource id or wrapped key.
    pub fn from_fields(share_id: &str, fields: &Fields) -> Option<Self> {
        Some(Self {
            share_id: share_id.to_string(),
            resource_id: fields.get(FIELD_FILE_ID)?.clone(),
            owner_id: fields.get(FIELD_OWNER_ID).cloned().unwrap_or_default(),
            wrapped_key: fields.get(FIELD_WRAPPED_KEY)?.clone(),
            valid: decode_valid(fields.get(FIELD_VALID).map(String::as_str)),
        })
    }

    /// The part of the record handed to the redeemer.
    pub fn into_data(self) -> ShareLinkData {
        ShareLinkData {
            file_id: self.resource_id,
            wrapped_key: self.wrapped_key,
        }
    }
}

/// Payload returned to the sole successful redeemer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkData {
    /// Protected resource (file) id.
    pub file_id: String,
    /// Content key wrapped under the link secret.
    pub wrapped_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_literal_is_strict() {
        assert!(decode_valid(Some("true")));
        assert!(!decode_valid(Some("True")));
        assert!(!decode_valid(Some("1")));
        assert!(!decode_valid(Some("false")));
        assert!(!decode_valid(None));
    }

    #[test]
    fn test_fields_layout() {
        let link = ShareLink {
            share_id: "s1".to_string(),
            resource_id: "f1".to_string(),
            owner_id: "42".to_string(),
            wrapped_key: "k1".to_string(),
            valid: true,
        };
        let fields = link.to_fields();
        assert_eq!(fields.get("file_id").map(String::as_str), Some("f1"));
        assert_eq!(fields.get("owner_id").map(String::as_str), Some("42"));
        assert_eq!(fields.get("wrapped_key").map(String::as_str), Some("k1"));
        assert_eq!(fields.get("valid").map(String::as_str), Some("true"));
        assert_eq!(ShareLink::from_fields("s1", &fields), Some(link));
    }

    #[test]
    fn test_empty_record_does_not_decode() {
        assert_eq!(ShareLink::from_fields("s1", &Fields::new()), None);
    }
}
