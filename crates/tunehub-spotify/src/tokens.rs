//! Per-user provider token persistence.

use std::sync::Arc;

use tunehub_cache::{CacheManager, keys};
use tunehub_core::result::AppResult;
use tunehub_core::traits::CacheProvider;
use tunehub_core::types::{ProviderTokens, UserId};

/// Stores and retrieves each user's provider tokens.
///
/// Tokens are written without expiry: a stale access token is not a problem
/// (the next call refreshes it) but an evicted refresh token would force the
/// user back through the handshake.
#[derive(Debug, Clone)]
pub struct TokenStore {
    cache: Arc<CacheManager>,
}

impl TokenStore {
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Persists a user's provider access token.
    pub async fn save_access_token(&self, user_id: &UserId, token: &str) -> AppResult<()> {
        self.cache
            .set_persistent(&keys::access_token(user_id), token)
            .await
    }

    /// Persists a user's provider refresh token.
    pub async fn save_refresh_token(&self, user_id: &UserId, token: &str) -> AppResult<()> {
        self.cache
            .set_persistent(&keys::refresh_token(user_id), token)
            .await
    }

    /// Persists both halves of a provider grant.
    pub async fn save_tokens(&self, user_id: &UserId, tokens: &ProviderTokens) -> AppResult<()> {
        self.save_access_token(user_id, &tokens.access_token)
            .await?;
        self.save_refresh_token(user_id, &tokens.refresh_token)
            .await
    }

    /// The user's stored access token, or `None` if they never completed the
    /// handshake.
    pub async fn access_token(&self, user_id: &UserId) -> AppResult<Option<String>> {
        self.cache.get(&keys::access_token(user_id)).await
    }

    /// The user's stored refresh token, if any.
    pub async fn refresh_token(&self, user_id: &UserId) -> AppResult<Option<String>> {
        self.cache.get(&keys::refresh_token(user_id)).await
    }

    /// Whether the user has a stored access token. Session tokens are only
    /// honored for users who still have one.
    pub async fn has_access_token(&self, user_id: &UserId) -> AppResult<bool> {
        self.cache.exists(&keys::access_token(user_id)).await
    }
}
