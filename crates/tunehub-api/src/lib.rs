//! # tunehub-api
//!
//! HTTP API layer for TuneHub. Routes, handlers, extractors, DTOs, and
//! middleware, built on Axum.
//!
//! The layer is deliberately thin: handlers translate HTTP into calls on
//! [`tunehub_spotify::SpotifyService`] and the session token machinery in
//! `tunehub-auth`, then shape the results for the web client.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
