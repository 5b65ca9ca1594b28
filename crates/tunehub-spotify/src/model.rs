//! Wire types for the provider's responses.
//!
//! Only the fields the application actually reads are modeled; the provider
//! sends far more and serde ignores the rest.

use serde::Deserialize;

/// Token grant returned by the accounts service for both the
/// authorization-code and refresh-token grant types.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Bearer token for Web API calls.
    pub access_token: String,
    /// Refresh token. Present on code exchanges, usually absent on refreshes.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Always "Bearer".
    #[serde(default)]
    pub token_type: String,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: u64,
    /// Space-separated scopes the grant covers.
    #[serde(default)]
    pub scope: Option<String>,
}

/// The profile of the user a token belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateUser {
    /// Provider-assigned user id.
    pub id: String,
    /// Display name, when the user has set one.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A playback device registered to the user's account.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    /// Device id. The provider reports `null` for restricted devices.
    pub id: Option<String>,
    /// Whether this device currently owns playback.
    #[serde(default)]
    pub is_active: bool,
    /// Human-readable device name.
    #[serde(default)]
    pub name: String,
    /// Device category ("Computer", "Smartphone", ...).
    #[serde(rename = "type", default)]
    pub device_type: String,
}

/// Envelope for the device listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DevicePage {
    pub devices: Vec<Device>,
}

/// Album artwork or artist image.
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Links into the provider's own apps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    /// Web player URL for the item.
    #[serde(default)]
    pub spotify: String,
}

/// A track's artist. The simplified form returned inside tracks carries the
/// same fields the application reads from full artist objects.
#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// Playable URI (`spotify:artist:...`).
    pub uri: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// The album slice of a track. Only artwork is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A track as returned by search, recommendations, and play history.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Playable URI (`spotify:track:...`).
    pub uri: String,
    /// Present only when the request carried a market.
    #[serde(default)]
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// One entry of the recently-played history.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Track,
    /// RFC 3339 timestamp of the play.
    #[serde(default)]
    pub played_at: String,
}

/// A page of items. The provider paginates most listing endpoints; the
/// application only ever reads the first page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u32>,
}

/// Envelope for track search results.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackSearchPage {
    pub tracks: Page<Track>,
}

/// Envelope for artist search results.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchPage {
    pub artists: Page<Artist>,
}

/// Envelope for the recommendations endpoint. Unlike search, the track list
/// is not paged.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsPage {
    pub tracks: Vec<Track>,
}

/// Tunable knobs for the recommendations endpoint.
///
/// All fields are optional; empty seed lists and unset bounds are simply
/// omitted from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationOptions {
    pub limit: Option<u32>,
    pub seed_artists: Vec<String>,
    pub seed_tracks: Vec<String>,
    pub min_energy: Option<f32>,
    pub max_energy: Option<f32>,
    pub min_acousticness: Option<f32>,
    pub max_acousticness: Option<f32>,
    pub min_danceability: Option<f32>,
    pub max_danceability: Option<f32>,
    pub min_instrumentalness: Option<f32>,
    pub max_instrumentalness: Option<f32>,
}

impl RecommendationOptions {
    /// Renders the set fields as query parameters. Seed lists are
    /// comma-joined the way the provider expects.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if !self.seed_artists.is_empty() {
            params.push(("seed_artists".to_string(), self.seed_artists.join(",")));
        }
        if !self.seed_tracks.is_empty() {
            params.push(("seed_tracks".to_string(), self.seed_tracks.join(",")));
        }
        for (name, value) in [
            ("min_energy", self.min_energy),
            ("max_energy", self.max_energy),
            ("min_acousticness", self.min_acousticness),
            ("max_acousticness", self.max_acousticness),
            ("min_danceability", self.min_danceability),
            ("max_danceability", self.max_danceability),
            ("min_instrumentalness", self.min_instrumentalness),
            ("max_instrumentalness", self.max_instrumentalness),
        ] {
            if let Some(value) = value {
                params.push((name.to_string(), value.to_string()));
            }
        }
        params
    }
}
