//! Response DTOs shaped for the web client.
//!
//! The client renders tracks and artists from a flattened view of the
//! provider's wire types: a `playUri` to feed the player and an `appUrl`
//! linking into the provider's own app.

use serde::{Deserialize, Serialize};

use tunehub_spotify::model::{Artist, Track};

/// Artist as the web client renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDto {
    pub id: String,
    pub name: String,
    /// URI to feed the player (`spotify:artist:...`).
    pub play_uri: String,
    /// Link into the provider's own app.
    pub app_url: String,
}

/// Track as the web client renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistDto>,
    /// Link into the provider's own app.
    pub app_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_playable: Option<bool>,
    /// First album image, or empty when the album has none.
    pub pic_url: String,
    /// URI to feed the player (`spotify:track:...`).
    pub play_uri: String,
}

/// Body of the track search and recommendations responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackDto>,
}

/// Body of the artist search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistDto>,
}

/// Freshly issued session access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: String,
}

impl From<&Artist> for ArtistDto {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id.clone(),
            name: artist.name.clone(),
            play_uri: artist.uri.clone(),
            app_url: artist.external_urls.spotify.clone(),
        }
    }
}

impl From<&Track> for TrackDto {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artists.iter().map(ArtistDto::from).collect(),
            app_url: track.external_urls.spotify.clone(),
            is_playable: track.is_playable,
            pic_url: track
                .album
                .images
                .first()
                .map(|image| image.url.clone())
                .unwrap_or_default(),
            play_uri: track.uri.clone(),
        }
    }
}
