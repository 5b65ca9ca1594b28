//! # tunehub-spotify
//!
//! Everything that talks to Spotify on a user's behalf.
//!
//! ## Modules
//!
//! - `api` — the [`SpotifyApi`] trait, the seam between the application and
//!   the provider's HTTP surface
//! - `client` — the reqwest-backed [`SpotifyWebClient`]
//! - `tokens` — per-user provider token persistence
//! - `executor` — [`SpotifyService`], which runs provider calls with
//!   transparent reauthentication
//! - `playback` — playback start with inactive-device recovery
//! - `model` — wire types for the provider's responses
//! - `mock` — a scriptable API double (tests and the `mock` feature)

pub mod api;
pub mod client;
pub mod error;
pub mod executor;
pub mod model;
pub mod playback;
pub mod tokens;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use api::SpotifyApi;
pub use client::SpotifyWebClient;
pub use error::SpotifyError;
pub use executor::SpotifyService;
pub use tokens::TokenStore;
