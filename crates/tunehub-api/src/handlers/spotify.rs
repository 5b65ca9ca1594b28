//! Spotify handlers: search, recommendations, playback.

use std::collections::HashSet;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use validator::Validate;

use tunehub_core::error::AppError;

use crate::dto::request::{PlayTracksQuery, RecommendationsRequest, SearchQuery};
use crate::dto::response::{ArtistDto, ArtistsResponse, TrackDto, TracksResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Result count for the search endpoints.
const SEARCH_LIMIT: u32 = 5;
/// Number of recommendations requested from the provider.
const RECOMMENDATIONS_LIMIT: u32 = 20;
/// History window consulted for the exclude-recent filter.
const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// GET /spotify/searchTracks?query=
pub async fn search_tracks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TracksResponse>, ApiError> {
    let tracks = state
        .spotify
        .search_tracks(&user.user_id, &query.query, SEARCH_LIMIT)
        .await?;

    Ok(Json(TracksResponse {
        tracks: tracks.iter().map(TrackDto::from).collect(),
    }))
}

/// GET /spotify/searchArtists?query=
pub async fn search_artists(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ArtistsResponse>, ApiError> {
    let artists = state
        .spotify
        .search_artists(&user.user_id, &query.query, SEARCH_LIMIT)
        .await?;

    Ok(Json(ArtistsResponse {
        artists: artists.iter().map(ArtistDto::from).collect(),
    }))
}

/// POST /spotify/recommendations
///
/// Fetches recommendations for the given seeds and bounds, then applies
/// the requested exclusion filters: `excludeLiked` drops tracks already
/// in the user's library, `excludeRecent` drops tracks seen in the last
/// fifty plays.
pub async fn recommendations(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<RecommendationsRequest>,
) -> Result<Json<TracksResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut tracks = state
        .spotify
        .recommendations(&user.user_id, req.to_options(RECOMMENDATIONS_LIMIT))
        .await?;

    if req.exclude_liked.unwrap_or(false) && !tracks.is_empty() {
        let ids: Vec<String> = tracks.iter().map(|track| track.id.clone()).collect();
        let liked = state
            .spotify
            .contains_saved_tracks(&user.user_id, ids)
            .await?;
        // The provider answers index-aligned with the ids it was asked about.
        tracks = tracks
            .into_iter()
            .zip(liked)
            .filter_map(|(track, is_liked)| (!is_liked).then_some(track))
            .collect();
    }

    if req.exclude_recent.unwrap_or(false) {
        let recent = state
            .spotify
            .recently_played(&user.user_id, RECENTLY_PLAYED_LIMIT)
            .await?;
        let recent_ids: HashSet<String> =
            recent.into_iter().map(|item| item.track.id).collect();
        tracks.retain(|track| !recent_ids.contains(&track.id));
    }

    Ok(Json(TracksResponse {
        tracks: tracks.iter().map(TrackDto::from).collect(),
    }))
}

/// GET /spotify/playTracks?uris=
///
/// Starts playback of the given comma-separated track URIs on the user's
/// player, transferring playback to their first device when no device is
/// active.
pub async fn play_tracks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PlayTracksQuery>,
) -> Result<StatusCode, ApiError> {
    let uris: Vec<String> = query.uris.split(',').map(str::to_string).collect();
    state.spotify.play_tracks(&user.user_id, uris).await?;
    Ok(StatusCode::OK)
}
