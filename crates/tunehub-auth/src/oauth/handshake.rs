//! Callback validation for the authorization-code handshake.

use tunehub_core::types::UserId;

/// A completed provider login: the authenticated user plus the provider
/// token pair obtained from the code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedLogin {
    /// The provider account the grant belongs to.
    pub user_id: UserId,
    /// Provider access token from the code exchange.
    pub access_token: String,
    /// Provider refresh token from the code exchange.
    pub refresh_token: String,
}

/// The verdict on a returning authorization callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// State matched and the provider authenticated the user.
    Accepted(GrantedLogin),
    /// State mismatch, missing state cookie, or no authenticated user.
    Rejected,
}

/// Decides whether a returning callback completes the handshake.
///
/// The callback is accepted only when the state echoed by the provider
/// matches the value previously planted in the client cookie AND the code
/// exchange produced an authenticated login. Every other combination is
/// rejected, including a missing cookie: a callback that arrives without
/// one was not started by us.
pub fn complete_handshake(
    cookie_state: Option<&str>,
    callback_state: &str,
    login: Option<GrantedLogin>,
) -> HandshakeOutcome {
    let state_matches = cookie_state.is_some_and(|cookie| cookie == callback_state);
    match (state_matches, login) {
        (true, Some(login)) => HandshakeOutcome::Accepted(login),
        _ => HandshakeOutcome::Rejected,
    }
}
