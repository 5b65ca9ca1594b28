//! Cache key builders for all TuneHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. The token key shapes are a
//! compatibility contract with existing deployments: `<userId>:accessToken`
//! and `<userId>:refreshToken`, no prefix.

use tunehub_core::types::UserId;

/// Key holding a user's provider access token.
pub fn access_token(user_id: &UserId) -> String {
    format!("{user_id}:accessToken")
}

/// Key holding a user's provider refresh token.
pub fn refresh_token(user_id: &UserId) -> String {
    format!("{user_id}:refreshToken")
}
