//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Body of `POST /access/link/create`.
///
/// Fields are optional at the serde level so that a missing field is a
/// validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Resource id. Accepts a JSON string or integer.
    #[serde(default, deserialize_with = "deserialize_file_id")]
    #[validate(required, length(min = 1))]
    pub file_id: Option<String>,
    /// Content key wrapped under the link secret.
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub wrapped_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFileId {
    Text(String),
    Integer(i64),
}

fn deserialize_file_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawFileId>::deserialize(deserializer)?.map(|raw| match raw {
            RawFileId::Text(s) => s,
            RawFileId::Integer(n) => n.to_string(),
        }),
    )
}
