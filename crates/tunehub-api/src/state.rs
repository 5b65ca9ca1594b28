//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tunehub_auth::jwt::decoder::JwtDecoder;
use tunehub_auth::jwt::encoder::JwtEncoder;
use tunehub_cache::provider::CacheManager;
use tunehub_core::config::AppConfig;
use tunehub_spotify::SpotifyService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session JWT encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Session JWT decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Provider ─────────────────────────────────────────────
    /// Spotify facade: authenticated call execution, token persistence,
    /// playback recovery
    pub spotify: Arc<SpotifyService>,
}
