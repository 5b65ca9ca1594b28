//! Scriptable in-memory double for the provider API.
//!
//! Tests queue responses per method and inspect the recorded calls
//! afterwards. An unscripted call panics so a test that trips an extra
//! provider round-trip fails loudly.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::api::SpotifyApi;
use crate::error::SpotifyError;
use crate::model::{
    Album, Artist, Device, ExternalUrls, Image, PlayHistoryItem, PrivateUser,
    RecommendationOptions, TokenGrant, Track,
};

#[derive(Debug, Default)]
struct MockState {
    exchange_responses: VecDeque<Result<TokenGrant, SpotifyError>>,
    refresh_responses: VecDeque<Result<TokenGrant, SpotifyError>>,
    current_user_responses: VecDeque<Result<PrivateUser, SpotifyError>>,
    search_tracks_responses: VecDeque<Result<Vec<Track>, SpotifyError>>,
    search_artists_responses: VecDeque<Result<Vec<Artist>, SpotifyError>>,
    recommendations_responses: VecDeque<Result<Vec<Track>, SpotifyError>>,
    recently_played_responses: VecDeque<Result<Vec<PlayHistoryItem>, SpotifyError>>,
    contains_saved_responses: VecDeque<Result<Vec<bool>, SpotifyError>>,
    devices_responses: VecDeque<Result<Vec<Device>, SpotifyError>>,
    transfer_responses: VecDeque<Result<(), SpotifyError>>,
    play_responses: VecDeque<Result<(), SpotifyError>>,

    exchanged_codes: Vec<String>,
    refreshed_tokens: Vec<String>,
    current_user_tokens: Vec<String>,
    search_tracks_calls: Vec<(String, String, u32)>,
    search_artists_calls: Vec<(String, String, u32)>,
    recommendations_calls: Vec<(String, RecommendationOptions)>,
    recently_played_calls: Vec<(String, u32)>,
    contains_saved_calls: Vec<(String, Vec<String>)>,
    devices_tokens: Vec<String>,
    transfer_calls: Vec<(String, String)>,
    play_calls: Vec<(String, Vec<String>)>,
}

/// Scriptable [`SpotifyApi`] double.
#[derive(Debug, Default)]
pub struct MockSpotifyApi {
    state: Mutex<MockState>,
}

impl MockSpotifyApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Scripting ──

    pub fn script_exchange(&self, response: Result<TokenGrant, SpotifyError>) {
        self.state().exchange_responses.push_back(response);
    }

    pub fn script_refresh(&self, response: Result<TokenGrant, SpotifyError>) {
        self.state().refresh_responses.push_back(response);
    }

    pub fn script_current_user(&self, response: Result<PrivateUser, SpotifyError>) {
        self.state().current_user_responses.push_back(response);
    }

    pub fn script_search_tracks(&self, response: Result<Vec<Track>, SpotifyError>) {
        self.state().search_tracks_responses.push_back(response);
    }

    pub fn script_search_artists(&self, response: Result<Vec<Artist>, SpotifyError>) {
        self.state().search_artists_responses.push_back(response);
    }

    pub fn script_recommendations(&self, response: Result<Vec<Track>, SpotifyError>) {
        self.state().recommendations_responses.push_back(response);
    }

    pub fn script_recently_played(&self, response: Result<Vec<PlayHistoryItem>, SpotifyError>) {
        self.state().recently_played_responses.push_back(response);
    }

    pub fn script_contains_saved(&self, response: Result<Vec<bool>, SpotifyError>) {
        self.state().contains_saved_responses.push_back(response);
    }

    pub fn script_devices(&self, response: Result<Vec<Device>, SpotifyError>) {
        self.state().devices_responses.push_back(response);
    }

    pub fn script_transfer(&self, response: Result<(), SpotifyError>) {
        self.state().transfer_responses.push_back(response);
    }

    pub fn script_play(&self, response: Result<(), SpotifyError>) {
        self.state().play_responses.push_back(response);
    }

    // ── Recorded calls ──

    pub fn exchanged_codes(&self) -> Vec<String> {
        self.state().exchanged_codes.clone()
    }

    /// Refresh tokens passed to the refresh grant, in call order.
    pub fn refreshed_tokens(&self) -> Vec<String> {
        self.state().refreshed_tokens.clone()
    }

    pub fn refresh_call_count(&self) -> usize {
        self.state().refreshed_tokens.len()
    }

    pub fn current_user_tokens(&self) -> Vec<String> {
        self.state().current_user_tokens.clone()
    }

    /// `(access_token, query, limit)` per track search, in call order.
    pub fn search_tracks_calls(&self) -> Vec<(String, String, u32)> {
        self.state().search_tracks_calls.clone()
    }

    pub fn search_artists_calls(&self) -> Vec<(String, String, u32)> {
        self.state().search_artists_calls.clone()
    }

    pub fn recommendations_calls(&self) -> Vec<(String, RecommendationOptions)> {
        self.state().recommendations_calls.clone()
    }

    pub fn recently_played_calls(&self) -> Vec<(String, u32)> {
        self.state().recently_played_calls.clone()
    }

    pub fn contains_saved_calls(&self) -> Vec<(String, Vec<String>)> {
        self.state().contains_saved_calls.clone()
    }

    pub fn devices_call_count(&self) -> usize {
        self.state().devices_tokens.len()
    }

    /// `(access_token, device_id)` per transfer, in call order.
    pub fn transfer_calls(&self) -> Vec<(String, String)> {
        self.state().transfer_calls.clone()
    }

    /// `(access_token, uris)` per playback start, in call order.
    pub fn play_calls(&self) -> Vec<(String, Vec<String>)> {
        self.state().play_calls.clone()
    }
}

#[async_trait]
impl SpotifyApi for MockSpotifyApi {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://accounts.spotify.test/authorize?response_type=code&state={state}")
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, SpotifyError> {
        let mut state = self.state();
        state.exchanged_codes.push(code.to_string());
        state
            .exchange_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for exchange_code"))
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenGrant, SpotifyError> {
        let mut state = self.state();
        state.refreshed_tokens.push(refresh_token.to_string());
        state
            .refresh_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for refresh_grant"))
    }

    async fn current_user(&self, access_token: &str) -> Result<PrivateUser, SpotifyError> {
        let mut state = self.state();
        state.current_user_tokens.push(access_token.to_string());
        state
            .current_user_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for current_user"))
    }

    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let mut state = self.state();
        state
            .search_tracks_calls
            .push((access_token.to_string(), query.to_string(), limit));
        state
            .search_tracks_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for search_tracks"))
    }

    async fn search_artists(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, SpotifyError> {
        let mut state = self.state();
        state
            .search_artists_calls
            .push((access_token.to_string(), query.to_string(), limit));
        state
            .search_artists_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for search_artists"))
    }

    async fn recommendations(
        &self,
        access_token: &str,
        options: &RecommendationOptions,
    ) -> Result<Vec<Track>, SpotifyError> {
        let mut state = self.state();
        state
            .recommendations_calls
            .push((access_token.to_string(), options.clone()));
        state
            .recommendations_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for recommendations"))
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<PlayHistoryItem>, SpotifyError> {
        let mut state = self.state();
        state
            .recently_played_calls
            .push((access_token.to_string(), limit));
        state
            .recently_played_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for recently_played"))
    }

    async fn contains_saved_tracks(
        &self,
        access_token: &str,
        track_ids: &[String],
    ) -> Result<Vec<bool>, SpotifyError> {
        let mut state = self.state();
        state
            .contains_saved_calls
            .push((access_token.to_string(), track_ids.to_vec()));
        state.contains_saved_responses.pop_front().unwrap_or_else(|| {
            panic!("MockSpotifyApi: no scripted response for contains_saved_tracks")
        })
    }

    async fn devices(&self, access_token: &str) -> Result<Vec<Device>, SpotifyError> {
        let mut state = self.state();
        state.devices_tokens.push(access_token.to_string());
        state
            .devices_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for devices"))
    }

    async fn transfer_playback(
        &self,
        access_token: &str,
        device_id: &str,
    ) -> Result<(), SpotifyError> {
        let mut state = self.state();
        state
            .transfer_calls
            .push((access_token.to_string(), device_id.to_string()));
        state
            .transfer_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for transfer_playback"))
    }

    async fn start_playback(
        &self,
        access_token: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError> {
        let mut state = self.state();
        state
            .play_calls
            .push((access_token.to_string(), uris.to_vec()));
        state
            .play_responses
            .pop_front()
            .unwrap_or_else(|| panic!("MockSpotifyApi: no scripted response for start_playback"))
    }
}

// ── Fixtures ──

/// The provider's answer to an expired or missing bearer token.
pub fn unauthorized() -> SpotifyError {
    SpotifyError::Api {
        status: 401,
        payload: json!({"error": {"status": 401, "message": "The access token expired"}}),
    }
}

/// An arbitrary provider API error.
pub fn api_error(status: u16, message: &str) -> SpotifyError {
    SpotifyError::Api {
        status,
        payload: json!({"error": {"status": status, "message": message}}),
    }
}

/// A refresh grant carrying only a new access token.
pub fn grant(access_token: &str) -> TokenGrant {
    TokenGrant {
        access_token: access_token.to_string(),
        refresh_token: None,
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        scope: None,
    }
}

/// A code-exchange grant carrying both tokens.
pub fn code_grant(access_token: &str, refresh_token: &str) -> TokenGrant {
    TokenGrant {
        refresh_token: Some(refresh_token.to_string()),
        ..grant(access_token)
    }
}

pub fn user(id: &str) -> PrivateUser {
    PrivateUser {
        id: id.to_string(),
        display_name: Some(id.to_string()),
    }
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:artist:{id}"),
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/artist/{id}"),
        },
    }
}

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        is_playable: Some(true),
        artists: vec![artist("a1", "Artist One")],
        album: Album {
            images: vec![Image {
                url: format!("https://i.scdn.test/{id}.jpg"),
                height: Some(300),
                width: Some(300),
            }],
        },
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/track/{id}"),
        },
    }
}

pub fn device(id: &str, name: &str) -> Device {
    Device {
        id: Some(id.to_string()),
        is_active: false,
        name: name.to_string(),
        device_type: "Computer".to_string(),
    }
}

/// A device the provider reports without an id.
pub fn restricted_device(name: &str) -> Device {
    Device {
        id: None,
        is_active: false,
        name: name.to_string(),
        device_type: "Speaker".to_string(),
    }
}

pub fn history_item(track: Track) -> PlayHistoryItem {
    PlayHistoryItem {
        track,
        played_at: "2024-01-01T00:00:00Z".to_string(),
    }
}
