//! Authenticated provider-call execution.
//!
//! Stored provider tokens go stale all the time; the executor makes that
//! invisible to callers. Every operation goes through [`SpotifyService::execute`],
//! which binds the stored access token to the call, refreshes it on a 401,
//! and retries once.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use tunehub_core::error::AppError;
use tunehub_core::result::AppResult;
use tunehub_core::types::UserId;

use crate::api::SpotifyApi;
use crate::error::{REFRESH_ERROR_MESSAGE, SpotifyError};
use crate::model::{
    Artist, Device, PlayHistoryItem, PrivateUser, RecommendationOptions, TokenGrant, Track,
};
use crate::tokens::TokenStore;

/// Runs provider operations on behalf of users, refreshing their provider
/// access token when it has gone stale.
#[derive(Debug, Clone)]
pub struct SpotifyService {
    api: Arc<dyn SpotifyApi>,
    tokens: TokenStore,
}

impl SpotifyService {
    pub fn new(api: Arc<dyn SpotifyApi>, tokens: TokenStore) -> Self {
        Self { api, tokens }
    }

    /// The token store backing this service.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Builds the provider authorization URL for the handshake.
    pub fn authorize_url(&self, state: &str) -> String {
        self.api.authorize_url(state)
    }

    /// Exchanges an authorization code for a provider token grant.
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenGrant> {
        self.api
            .exchange_code(code)
            .await
            .map_err(SpotifyError::into_call_error)
    }

    /// Fetches the provider profile bound to a freshly granted access token.
    pub async fn current_user(&self, access_token: &str) -> AppResult<PrivateUser> {
        self.api
            .current_user(access_token)
            .await
            .map_err(SpotifyError::into_call_error)
    }

    /// Runs one provider operation with transparent reauthentication.
    ///
    /// The stored access token is loaded once and bound to this call. If the
    /// provider rejects it (401), the stored refresh token is exchanged for
    /// a fresh access token, the fresh token is persisted, and the operation
    /// is retried exactly once with it. Any other failure, including a
    /// failure of the retry itself, maps to an external-service error
    /// carrying the provider's payload.
    ///
    /// A missing access token is not checked up front: the call goes out
    /// with an empty bearer token, the provider rejects it, and the refresh
    /// path takes over.
    pub async fn execute<T, F, Fut>(&self, user_id: &UserId, operation: F) -> AppResult<T>
    where
        F: Fn(Arc<dyn SpotifyApi>, String) -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, SpotifyError>> + Send,
        T: Send,
    {
        // Read once, bound to this call. A concurrent refresh swaps the
        // stored token, never the one already handed to an in-flight call.
        let access_token = self
            .tokens
            .access_token(user_id)
            .await?
            .unwrap_or_default();

        match operation(Arc::clone(&self.api), access_token).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_unauthorized() => {
                warn!(user_id = %user_id, error = %err, "spotify auth error");
                let fresh_token = self.refresh_access_token(user_id).await?;
                operation(Arc::clone(&self.api), fresh_token)
                    .await
                    .map_err(SpotifyError::into_call_error)
            }
            Err(err) => Err(err.into_call_error()),
        }
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// The fresh token is persisted before it is returned, so it is durable
    /// before anything runs against it.
    async fn refresh_access_token(&self, user_id: &UserId) -> AppResult<String> {
        let refresh_token = self
            .tokens
            .refresh_token(user_id)
            .await?
            .ok_or_else(|| AppError::authentication(REFRESH_ERROR_MESSAGE))?;

        let grant = self
            .api
            .refresh_grant(&refresh_token)
            .await
            .map_err(SpotifyError::into_refresh_error)?;

        self.tokens
            .save_access_token(user_id, &grant.access_token)
            .await?;

        Ok(grant.access_token)
    }

    // ── Per-user provider operations ──

    pub async fn search_tracks(
        &self,
        user_id: &UserId,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<Track>> {
        let query = query.to_string();
        self.execute(user_id, move |api, token| {
            let query = query.clone();
            async move { api.search_tracks(&token, &query, limit).await }
        })
        .await
    }

    pub async fn search_artists(
        &self,
        user_id: &UserId,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<Artist>> {
        let query = query.to_string();
        self.execute(user_id, move |api, token| {
            let query = query.clone();
            async move { api.search_artists(&token, &query, limit).await }
        })
        .await
    }

    pub async fn recommendations(
        &self,
        user_id: &UserId,
        options: RecommendationOptions,
    ) -> AppResult<Vec<Track>> {
        self.execute(user_id, move |api, token| {
            let options = options.clone();
            async move { api.recommendations(&token, &options).await }
        })
        .await
    }

    pub async fn recently_played(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> AppResult<Vec<PlayHistoryItem>> {
        self.execute(user_id, move |api, token| async move {
            api.recently_played(&token, limit).await
        })
        .await
    }

    pub async fn contains_saved_tracks(
        &self,
        user_id: &UserId,
        track_ids: Vec<String>,
    ) -> AppResult<Vec<bool>> {
        self.execute(user_id, move |api, token| {
            let track_ids = track_ids.clone();
            async move { api.contains_saved_tracks(&token, &track_ids).await }
        })
        .await
    }

    pub async fn devices(&self, user_id: &UserId) -> AppResult<Vec<Device>> {
        self.execute(user_id, |api, token| async move {
            api.devices(&token).await
        })
        .await
    }

    pub async fn transfer_playback(&self, user_id: &UserId, device_id: &str) -> AppResult<()> {
        let device_id = device_id.to_string();
        self.execute(user_id, move |api, token| {
            let device_id = device_id.clone();
            async move { api.transfer_playback(&token, &device_id).await }
        })
        .await
    }

    pub async fn start_playback(&self, user_id: &UserId, uris: Vec<String>) -> AppResult<()> {
        self.execute(user_id, move |api, token| {
            let uris = uris.clone();
            async move { api.start_playback(&token, &uris).await }
        })
        .await
    }
}
