//! Shared domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier a user carries on the streaming provider.
///
/// Provider user ids are opaque strings assigned by the provider, so this
/// wraps a `String` rather than a UUID. The newtype keeps user ids from
/// being confused with other string-typed values (tokens, device ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a provider-assigned user id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Access/refresh token pair granted by the streaming provider.
///
/// Produced by the OAuth handshake and by token refreshes; persisted per
/// user so provider calls can be made on the user's behalf later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTokens {
    /// Short-lived token sent as a bearer credential on provider calls.
    pub access_token: String,
    /// Long-lived token used to obtain fresh access tokens.
    pub refresh_token: String,
}
