//! Route definitions for the TuneHub HTTP API.
//!
//! Routes are organized by domain and mounted at the root, matching the
//! paths the web client and the provider's registered redirect URL expect.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::http::{HeaderName, HeaderValue, Method};
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state);

    Router::new()
        .merge(auth_routes())
        .merge(spotify_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: handshake start, provider callback, session refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(handlers::auth::login))
        .route("/auth/redirect", get(handlers::auth::redirect))
        .route("/auth/refreshToken", get(handlers::auth::refresh_token))
}

/// Provider endpoints: search, recommendations, playback
fn spotify_routes() -> Router<AppState> {
    Router::new()
        .route("/spotify/searchTracks", get(handlers::spotify::search_tracks))
        .route(
            "/spotify/searchArtists",
            get(handlers::spotify::search_artists),
        )
        .route(
            "/spotify/recommendations",
            post(handlers::spotify::recommendations),
        )
        .route("/spotify/playTracks", get(handlers::spotify::play_tracks))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
///
/// The web client authenticates with cross-site cookies, so credentials
/// are usually on; browsers reject the `*` origin in that mode, which is
/// why origins are listed explicitly outside development.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    let wildcard_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if wildcard_origin {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let wildcard_headers = cors_config.allowed_headers.iter().any(|h| h == "*");
    if wildcard_headers {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|header| header.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    // tower-http rejects `*` origins or headers combined with credentials.
    if cors_config.allow_credentials && !wildcard_origin && !wildcard_headers {
        cors = cors.allow_credentials(true);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
