//! TuneHub Server — Spotify session backend for the TuneHub web client.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use tunehub_auth::jwt::decoder::JwtDecoder;
use tunehub_auth::jwt::encoder::JwtEncoder;
use tunehub_cache::provider::CacheManager;
use tunehub_core::config::AppConfig;
use tunehub_core::error::AppError;
use tunehub_spotify::{SpotifyApi, SpotifyService, SpotifyWebClient, TokenStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("TUNEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TuneHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    tracing::info!("Cache initialized");

    // ── Step 2: Initialize Spotify client ────────────────────────
    let spotify_client: Arc<dyn SpotifyApi> = Arc::new(SpotifyWebClient::new(&config.spotify)?);
    let token_store = TokenStore::new(Arc::clone(&cache));
    let spotify = Arc::new(SpotifyService::new(spotify_client, token_store));

    // ── Step 3: Initialize session tokens ────────────────────────
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 4: Build application state ──────────────────────────
    let state = tunehub_api::AppState {
        config: Arc::new(config.clone()),
        cache,
        jwt_encoder,
        jwt_decoder,
        spotify,
    };

    let app = tunehub_api::build_router(state);

    // ── Step 5: Bind and serve ───────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("TuneHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("TuneHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
