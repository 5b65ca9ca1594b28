//! Integration tests for the OAuth handshake and session token flow.

mod helpers;

use http::StatusCode;

use tunehub_core::types::UserId;
use tunehub_spotify::mock;

#[tokio::test]
async fn test_login_plants_state_cookie_and_redirects() {
    let app = helpers::TestApp::new();

    let response = app.get("/auth/login", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let state = response
        .cookie_value("spotify_auth_state")
        .expect("No state cookie set");
    assert!(!state.is_empty());

    let set_cookie = response.set_cookies().join("; ");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=None"));

    // The redirect must carry the same state the cookie does.
    let location = response.location().to_string();
    assert!(location.starts_with("https://accounts.spotify.test/authorize"));
    assert!(location.ends_with(&format!("state={}", state)));
}

#[tokio::test]
async fn test_login_honors_client_supplied_state() {
    let app = helpers::TestApp::new();

    let response = app.get("/auth/login?state=client-chosen-state", None).await;

    assert_eq!(
        response.cookie_value("spotify_auth_state").as_deref(),
        Some("client-chosen-state")
    );
    assert!(response.location().ends_with("state=client-chosen-state"));
}

#[tokio::test]
async fn test_callback_with_matching_state_links_account() {
    let app = helpers::TestApp::new();
    app.spotify
        .script_exchange(Ok(mock::code_grant("provider-access", "provider-refresh")));
    app.spotify.script_current_user(Ok(mock::user("wizzler")));

    let response = app
        .get_with_cookie(
            "/auth/redirect?code=AQD4yhd&state=xyz-state",
            "spotify_auth_state=xyz-state",
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "https://app.tunehub.test");
    assert_eq!(app.spotify.exchanged_codes(), vec!["AQD4yhd".to_string()]);

    // Both provider tokens are persisted for the profile's user id.
    let user_id = UserId::new("wizzler");
    assert_eq!(
        app.tokens.access_token(&user_id).await.unwrap().as_deref(),
        Some("provider-access")
    );
    assert_eq!(
        app.tokens.refresh_token(&user_id).await.unwrap().as_deref(),
        Some("provider-refresh")
    );

    // A session refresh cookie is planted for the linked user.
    let refresh_cookie = response
        .cookie_value("refresh_token")
        .expect("No refresh token cookie set");
    let claims = app.jwt_decoder.decode_refresh_token(&refresh_cookie).unwrap();
    assert_eq!(claims.user_id().as_str(), "wizzler");

    // The state cookie is cleared once the handshake settles.
    let state_clear = response
        .set_cookies()
        .into_iter()
        .find(|c| c.starts_with("spotify_auth_state="))
        .expect("State cookie not cleared");
    assert!(state_clear.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_callback_with_mismatched_state_rejects_and_persists_nothing() {
    let app = helpers::TestApp::new();
    // The provider half still runs before validation; even a successful
    // exchange must leave no trace when the state check fails.
    app.spotify
        .script_exchange(Ok(mock::code_grant("provider-access", "provider-refresh")));
    app.spotify.script_current_user(Ok(mock::user("wizzler")));

    let response = app
        .get_with_cookie(
            "/auth/redirect?code=AQD4yhd&state=forged-state",
            "spotify_auth_state=genuine-state",
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location(),
        "https://app.tunehub.test/login?error=true"
    );

    let user_id = UserId::new("wizzler");
    assert_eq!(app.tokens.access_token(&user_id).await.unwrap(), None);
    assert_eq!(app.tokens.refresh_token(&user_id).await.unwrap(), None);
    assert!(response.cookie_value("refresh_token").is_none());
}

#[tokio::test]
async fn test_callback_without_state_cookie_rejects() {
    let app = helpers::TestApp::new();
    app.spotify
        .script_exchange(Ok(mock::code_grant("provider-access", "provider-refresh")));
    app.spotify.script_current_user(Ok(mock::user("wizzler")));

    let response = app.get("/auth/redirect?code=AQD4yhd&state=xyz", None).await;

    assert_eq!(
        response.location(),
        "https://app.tunehub.test/login?error=true"
    );
    assert_eq!(
        app.tokens
            .access_token(&UserId::new("wizzler"))
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_callback_rejects_when_code_exchange_fails() {
    let app = helpers::TestApp::new();
    app.spotify
        .script_exchange(Err(mock::api_error(400, "invalid_grant")));

    let response = app
        .get_with_cookie(
            "/auth/redirect?code=expired-code&state=xyz-state",
            "spotify_auth_state=xyz-state",
        )
        .await;

    assert_eq!(
        response.location(),
        "https://app.tunehub.test/login?error=true"
    );
    assert!(response.cookie_value("refresh_token").is_none());
}

#[tokio::test]
async fn test_callback_rejects_when_user_denied_authorization() {
    let app = helpers::TestApp::new();

    let response = app
        .get_with_cookie(
            "/auth/redirect?error=access_denied&state=xyz-state",
            "spotify_auth_state=xyz-state",
        )
        .await;

    assert_eq!(
        response.location(),
        "https://app.tunehub.test/login?error=true"
    );
    // The denial short-circuits before any provider call.
    assert!(app.spotify.exchanged_codes().is_empty());
}

#[tokio::test]
async fn test_refresh_token_issues_session_access_token() {
    let app = helpers::TestApp::new();
    app.link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    let refresh_jwt = app
        .jwt_encoder
        .issue_refresh_token(&UserId::new("wizzler"))
        .unwrap();

    let response = app
        .get_with_cookie(
            "/auth/refreshToken",
            &format!("refresh_token={}", refresh_jwt),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().expect("No token in body");
    let claims = app.jwt_decoder.decode_access_token(token).unwrap();
    assert_eq!(claims.user_id().as_str(), "wizzler");
}

#[tokio::test]
async fn test_refresh_token_rejects_access_token_in_cookie() {
    let app = helpers::TestApp::new();
    let access_jwt = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;

    let response = app
        .get_with_cookie(
            "/auth/refreshToken",
            &format!("refresh_token={}", access_jwt),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_requires_linked_spotify_account() {
    let app = helpers::TestApp::new();
    // Valid JWT, but no provider tokens in the store.
    let refresh_jwt = app
        .jwt_encoder
        .issue_refresh_token(&UserId::new("ghost"))
        .unwrap();

    let response = app
        .get_with_cookie(
            "/auth/refreshToken",
            &format!("refresh_token={}", refresh_jwt),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_without_cookie_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.get("/auth/refreshToken", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}
