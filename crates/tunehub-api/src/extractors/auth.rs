//! Session extractors: pull a JWT from the request, validate it, and
//! resolve the caller's provider identity.
//!
//! A session token is only honored while the user still has a stored
//! provider access token. A user whose provider link was wiped (cache
//! flush, revocation) has to run the handshake again, even if their JWT
//! is otherwise valid.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use tunehub_core::error::AppError;
use tunehub_core::types::UserId;

use crate::cookies::REFRESH_TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller authenticated by a bearer access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Provider user id carried in the token.
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        // Decode and validate JWT
        let claims = state.jwt_decoder.decode_access_token(token)?;
        let user_id = claims.user_id();

        require_provider_link(state, &user_id).await?;

        Ok(AuthUser { user_id })
    }
}

/// Caller authenticated by the refresh token cookie.
///
/// Only the session refresh endpoint uses this; everything else expects a
/// bearer access token.
#[derive(Debug, Clone)]
pub struct RefreshUser {
    /// Provider user id carried in the token.
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(REFRESH_TOKEN_COOKIE)
            .ok_or_else(|| AppError::authentication("Missing refresh token cookie"))?;

        let claims = state.jwt_decoder.decode_refresh_token(cookie.value())?;
        let user_id = claims.user_id();

        require_provider_link(state, &user_id).await?;

        Ok(RefreshUser { user_id })
    }
}

async fn require_provider_link(state: &AppState, user_id: &UserId) -> Result<(), ApiError> {
    if state.spotify.tokens().has_access_token(user_id).await? {
        Ok(())
    } else {
        Err(AppError::authentication("No linked Spotify account for user").into())
    }
}
