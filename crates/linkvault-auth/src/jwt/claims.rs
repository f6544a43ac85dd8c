//! JWT claims carried by bearer tokens from the identity service.

use serde::{Deserialize, Deserializer, Serialize};

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller id. Numeric subjects are stringified.
    #[serde(deserialize_with = "deserialize_subject")]
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Token type, when the issuer sets one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token; never accepted by this service.
    Refresh,
}

impl Claims {
    /// Returns the caller id from the subject claim.
    pub fn caller_id(&self) -> &str {
        &self.sub
    }

    /// Whether the token may be used to call the API.
    pub fn is_access(&self) -> bool {
        matches!(self.token_type, None | Some(TokenType::Access))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubject {
    Text(String),
    Number(i64),
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawSubject::deserialize(deserializer)? {
        RawSubject::Text(s) => s,
        RawSubject::Number(n) => n.to_string(),
    })
}
