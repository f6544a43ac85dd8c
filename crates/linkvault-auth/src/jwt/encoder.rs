//! JWT token creation, sharing the identity service's secret.
//!
//! Production tokens come from the account service; this encoder exists for
//! test fixtures and operator tooling.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use linkvault_core::config::AuthConfig;
use linkvault_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
        }
    }

    /// Generates an access token for `subject` with the configured TTL.
    pub fn issue_access_token(&self, subject: &str) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue_token_expiring(subject, chrono::Duration::minutes(self.access_ttl_minutes))
    }

    /// Generates an access token expiring `lifetime` from now.
    pub fn issue_token_expiring(
        &self,
        subject: &str,
        lifetime: chrono::Duration,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + lifetime;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
            token_type: Some(TokenType::Access),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }
}
