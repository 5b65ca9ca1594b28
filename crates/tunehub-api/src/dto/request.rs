//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tunehub_spotify::model::RecommendationOptions;

/// Query string for the search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term.
    pub query: String,
}

/// Query string for the playback endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayTracksQuery {
    /// Comma-separated track URIs (`spotify:track:...,spotify:track:...`).
    pub uris: String,
}

/// Optional state carried into the handshake start.
///
/// The web client may supply its own state value; when absent the server
/// generates one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginQuery {
    /// Anti-forgery state to plant in the state cookie.
    #[serde(default)]
    pub state: Option<String>,
}

/// Query parameters arriving on the provider's callback redirect.
///
/// The provider sends `code` + `state` on success and `error` + `state`
/// when the user denied the authorization prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for tokens.
    #[serde(default)]
    pub code: Option<String>,
    /// Echo of the anti-forgery state.
    #[serde(default)]
    pub state: Option<String>,
    /// Error code when the user denied authorization.
    #[serde(default)]
    pub error: Option<String>,
}

/// Recommendation request body.
///
/// Seeds and audio-feature bounds pass straight through to the provider.
/// The two `exclude*` flags are applied server-side after the provider
/// answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RecommendationsRequest {
    /// Artist ids to seed the recommendations with.
    pub seed_artists: Option<Vec<String>>,
    /// Track ids to seed the recommendations with.
    pub seed_tracks: Option<Vec<String>>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub min_energy: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_energy: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_acousticness: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_acousticness: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_danceability: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_danceability: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_instrumentalness: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_instrumentalness: Option<f32>,

    /// Drop tracks the user already saved to their library.
    #[serde(rename = "excludeLiked")]
    pub exclude_liked: Option<bool>,
    /// Drop tracks the user played recently.
    #[serde(rename = "excludeRecent")]
    pub exclude_recent: Option<bool>,
}

impl RecommendationsRequest {
    /// Lower the request to provider options, attaching the server-side
    /// result limit.
    pub fn to_options(&self, limit: u32) -> RecommendationOptions {
        RecommendationOptions {
            limit: Some(limit),
            seed_artists: self.seed_artists.clone().unwrap_or_default(),
            seed_tracks: self.seed_tracks.clone().unwrap_or_default(),
            min_energy: self.min_energy,
            max_energy: self.max_energy,
            min_acousticness: self.min_acousticness,
            max_acousticness: self.max_acousticness,
            min_danceability: self.min_danceability,
            max_danceability: self.max_danceability,
            min_instrumentalness: self.min_instrumentalness,
            max_instrumentalness: self.max_instrumentalness,
        }
    }
}
