//! Cookie construction for the handshake and session refresh flows.
//!
//! The web client lives on a different origin than this server, so every
//! cookie is `SameSite=None` and scoped to `/`. The `Secure` attribute is
//! driven by configuration so local development over plain HTTP still works.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie carrying the anti-forgery state while the handshake is in flight.
pub const STATE_COOKIE: &str = "spotify_auth_state";

/// Cookie carrying the long-lived session refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// State cookie planted when the handshake starts.
pub fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    session_cookie(STATE_COOKIE, value, secure)
}

/// Named cookie handed to `CookieJar::remove` to clear the state cookie
/// once the handshake is settled.
pub fn state_removal_cookie() -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, "")).path("/").build()
}

/// Refresh token cookie set when a handshake completes.
pub fn refresh_token_cookie(value: String, secure: bool) -> Cookie<'static> {
    session_cookie(REFRESH_TOKEN_COOKIE, value, secure)
}

// Session cookies on purpose: no Max-Age, they die with the browser.
fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .build()
}
