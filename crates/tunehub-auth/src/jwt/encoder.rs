//! Session token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use tunehub_core::config::AuthConfig;
use tunehub_core::error::AppError;
use tunehub_core::result::AppResult;
use tunehub_core::types::UserId;

use super::claims::{Claims, TokenType};

/// Creates signed session access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in seconds.
    access_ttl_seconds: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_seconds: config.jwt_access_ttl_seconds as i64,
            refresh_ttl_days: config.jwt_refresh_ttl_days as i64,
        }
    }

    /// Issues a short-lived access token for the given user.
    pub fn issue_access_token(&self, user_id: &UserId) -> AppResult<String> {
        self.issue(
            user_id,
            chrono::Duration::seconds(self.access_ttl_seconds),
            TokenType::Access,
        )
    }

    /// Issues a long-lived refresh token for the given user.
    pub fn issue_refresh_token(&self, user_id: &UserId) -> AppResult<String> {
        self.issue(
            user_id,
            chrono::Duration::days(self.refresh_ttl_days),
            TokenType::Refresh,
        )
    }

    fn issue(
        &self,
        user_id: &UserId,
        ttl: chrono::Duration,
        token_type: TokenType,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            name: user_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
