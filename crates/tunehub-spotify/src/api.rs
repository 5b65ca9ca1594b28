//! The seam between the application and the provider's HTTP surface.

use async_trait::async_trait;

use crate::error::SpotifyError;
use crate::model::{
    Artist, Device, PlayHistoryItem, PrivateUser, RecommendationOptions, TokenGrant, Track,
};

/// Everything the application asks of the provider.
///
/// Web API methods take the bearer token explicitly so each call is bound to
/// the token that was current when it started; nothing here holds per-user
/// state. [`SpotifyWebClient`](crate::client::SpotifyWebClient) is the real
/// implementation, [`MockSpotifyApi`](crate::mock::MockSpotifyApi) the
/// scriptable double.
#[async_trait]
pub trait SpotifyApi: Send + Sync + std::fmt::Debug + 'static {
    /// Builds the URL the browser is sent to for the authorization prompt.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for a token grant.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, SpotifyError>;

    /// Exchanges a refresh token for a fresh token grant.
    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenGrant, SpotifyError>;

    /// Fetches the profile of the user the token belongs to.
    async fn current_user(&self, access_token: &str) -> Result<PrivateUser, SpotifyError>;

    /// Searches tracks by free-text query.
    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError>;

    /// Searches artists by free-text query.
    async fn search_artists(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, SpotifyError>;

    /// Fetches track recommendations for the given seeds and bounds.
    async fn recommendations(
        &self,
        access_token: &str,
        options: &RecommendationOptions,
    ) -> Result<Vec<Track>, SpotifyError>;

    /// Fetches the user's most recently played tracks.
    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<PlayHistoryItem>, SpotifyError>;

    /// For each track id, whether it is in the user's saved tracks.
    /// The result is index-aligned with the input.
    async fn contains_saved_tracks(
        &self,
        access_token: &str,
        track_ids: &[String],
    ) -> Result<Vec<bool>, SpotifyError>;

    /// Lists the user's playback devices.
    async fn devices(&self, access_token: &str) -> Result<Vec<Device>, SpotifyError>;

    /// Moves playback to the given device.
    async fn transfer_playback(
        &self,
        access_token: &str,
        device_id: &str,
    ) -> Result<(), SpotifyError>;

    /// Starts playback of the given track URIs from the first track.
    async fn start_playback(
        &self,
        access_token: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError>;
}
