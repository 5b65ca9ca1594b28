//! Session credential configuration.

use serde::{Deserialize, Serialize};

/// Session JWT and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_seconds: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_days: u64,
    /// Whether auth cookies carry the `Secure` attribute. Disable only in
    /// local development; the cookies are `SameSite=None` and browsers
    /// require `Secure` for those everywhere else.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_seconds: default_access_ttl(),
            jwt_refresh_ttl_days: default_refresh_ttl(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    365
}

fn default_secure_cookies() -> bool {
    true
}
