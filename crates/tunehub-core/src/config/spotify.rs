//! Streaming provider configuration.

use serde::{Deserialize, Serialize};

/// Spotify application credentials and endpoints.
///
/// `client_id` and `client_secret` come from the provider's developer
/// dashboard and are expected via environment overrides
/// (`TUNEHUB__SPOTIFY__CLIENT_ID` etc.) rather than checked-in files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth client id.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URL registered with the provider; the provider sends the
    /// authorization code here.
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
    /// Base URL of the web client; handshake completions redirect here.
    #[serde(default = "default_app_url")]
    pub app_url: String,
    /// Provider accounts host (authorization + token grants).
    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,
    /// Provider Web API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Space-separated scope list requested during the handshake.
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            callback_url: default_callback_url(),
            app_url: default_app_url(),
            accounts_url: default_accounts_url(),
            api_url: default_api_url(),
            scope: default_scope(),
        }
    }
}

fn default_callback_url() -> String {
    "http://127.0.0.1:8080/auth/redirect".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_accounts_url() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_scope() -> String {
    "user-library-read streaming user-top-read user-read-playback-state user-read-recently-played"
        .to_string()
}
