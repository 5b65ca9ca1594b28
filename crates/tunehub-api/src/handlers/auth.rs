//! Auth handlers: handshake start, provider callback, session refresh.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use tunehub_auth::oauth::{self, GrantedLogin, HandshakeOutcome};
use tunehub_core::types::{ProviderTokens, UserId};

use crate::cookies;
use crate::dto::request::{CallbackQuery, LoginQuery};
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::RefreshUser;
use crate::state::AppState;

/// GET /auth/login
///
/// Starts the handshake: plants the anti-forgery state cookie and sends
/// the browser to the provider's authorization prompt. The cookie is set
/// on every start, so repeat attempts always race against the freshest
/// state value.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> (CookieJar, Redirect) {
    let handshake_state = query.state.unwrap_or_else(oauth::generate_state);
    let authorize_url = state.spotify.authorize_url(&handshake_state);

    let jar = jar.add(cookies::state_cookie(
        handshake_state,
        state.config.auth.secure_cookies,
    ));

    (jar, Redirect::to(&authorize_url))
}

/// GET /auth/redirect
///
/// Completes the handshake. The provider exchange runs first; acceptance
/// then requires the echoed state to match the cookie AND the exchange to
/// have produced a login. Acceptance persists the provider tokens and
/// plants the session refresh cookie. Rejection persists nothing and
/// bounces the browser to the web client's login page with an error flag.
pub async fn redirect(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let cookie_state = jar
        .get(cookies::STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let callback_state = query.state.clone().unwrap_or_default();

    let login = provider_login(&state, query).await;

    match oauth::complete_handshake(cookie_state.as_deref(), &callback_state, login) {
        HandshakeOutcome::Accepted(login) => {
            state
                .spotify
                .tokens()
                .save_tokens(
                    &login.user_id,
                    &ProviderTokens {
                        access_token: login.access_token,
                        refresh_token: login.refresh_token,
                    },
                )
                .await?;

            let refresh_token = state.jwt_encoder.issue_refresh_token(&login.user_id)?;

            info!(user_id = %login.user_id, "spotify account linked");

            let jar = jar
                .add(cookies::refresh_token_cookie(
                    refresh_token,
                    state.config.auth.secure_cookies,
                ))
                .remove(cookies::state_removal_cookie());

            Ok((jar, Redirect::to(&state.config.spotify.app_url)))
        }
        HandshakeOutcome::Rejected => {
            warn!("spotify handshake rejected");
            let error_url = format!("{}/login?error=true", state.config.spotify.app_url);
            Ok((jar, Redirect::to(&error_url)))
        }
    }
}

/// GET /auth/refreshToken
///
/// Issues a fresh session access token for the caller identified by the
/// refresh token cookie.
pub async fn refresh_token(
    State(state): State<AppState>,
    user: RefreshUser,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.jwt_encoder.issue_access_token(&user.user_id)?;
    Ok(Json(TokenResponse { token }))
}

/// Runs the provider half of the callback: code exchange plus profile
/// lookup. `None` means the provider did not authenticate the user.
async fn provider_login(state: &AppState, query: CallbackQuery) -> Option<GrantedLogin> {
    if let Some(error) = query.error {
        warn!(error = %error, "provider denied authorization");
        return None;
    }

    let code = query.code?;
    let grant = state.spotify.exchange_code(&code).await.ok()?;
    let refresh_token = grant.refresh_token.clone()?;
    let profile = state.spotify.current_user(&grant.access_token).await.ok()?;

    Some(GrantedLogin {
        user_id: UserId::new(profile.id),
        access_token: grant.access_token,
        refresh_token,
    })
}
