//! Integration tests for search, recommendations, and playback endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use tunehub_core::types::UserId;
use tunehub_spotify::mock;

const NO_DEVICE: &str = "Player command failed: No active device found";

#[tokio::test]
async fn test_search_tracks_shapes_response_for_client() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify
        .script_search_tracks(Ok(vec![mock::track("t1", "Song One")]));

    let response = app
        .get("/spotify/searchTracks?query=beatles", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let track = &response.body["tracks"][0];
    assert_eq!(track["id"], "t1");
    assert_eq!(track["name"], "Song One");
    assert_eq!(track["playUri"], "spotify:track:t1");
    assert_eq!(track["appUrl"], "https://open.spotify.com/track/t1");
    assert_eq!(track["picUrl"], "https://i.scdn.test/t1.jpg");
    assert_eq!(track["isPlayable"], true);
    assert_eq!(track["artists"][0]["playUri"], "spotify:artist:a1");

    // The provider saw the caller's token, query, and the fixed limit.
    assert_eq!(
        app.spotify.search_tracks_calls(),
        vec![(
            "provider-access".to_string(),
            "beatles".to_string(),
            5
        )]
    );
}

#[tokio::test]
async fn test_search_artists_uses_fixed_limit() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify
        .script_search_artists(Ok(vec![mock::artist("a9", "Nine Inch Nails")]));

    let response = app
        .get("/spotify/searchArtists?query=nin", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["artists"][0]["id"], "a9");
    assert_eq!(
        response.body["artists"][0]["appUrl"],
        "https://open.spotify.com/artist/a9"
    );
    assert_eq!(
        app.spotify.search_artists_calls(),
        vec![("provider-access".to_string(), "nin".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_expired_provider_token_is_refreshed_transparently() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "stale-token", "provider-refresh")
        .await;
    app.spotify.script_search_tracks(Err(mock::unauthorized()));
    app.spotify.script_refresh(Ok(mock::grant("fresh-token")));
    app.spotify
        .script_search_tracks(Ok(vec![mock::track("t1", "Song One")]));

    let response = app
        .get("/spotify/searchTracks?query=beatles", Some(&token))
        .await;

    // The caller never sees the expiry.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tracks"][0]["id"], "t1");

    // Refresh used the stored refresh token, and the new access token was
    // persisted and used for the retry.
    assert_eq!(
        app.spotify.refreshed_tokens(),
        vec!["provider-refresh".to_string()]
    );
    assert_eq!(
        app.spotify.search_tracks_calls(),
        vec![
            ("stale-token".to_string(), "beatles".to_string(), 5),
            ("fresh-token".to_string(), "beatles".to_string(), 5),
        ]
    );
    assert_eq!(
        app.tokens
            .access_token(&UserId::new("wizzler"))
            .await
            .unwrap()
            .as_deref(),
        Some("fresh-token")
    );
}

#[tokio::test]
async fn test_provider_rejection_maps_to_500_with_payload() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify
        .script_search_tracks(Err(mock::api_error(403, "Insufficient scope")));

    let response = app
        .get("/spotify/searchTracks?query=beatles", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "EXTERNAL_SERVICE_ERROR");
    assert_eq!(response.body["message"], "spotify client error");
    assert_eq!(response.body["details"]["message"], "Insufficient scope");

    // A non-401 failure must not trigger a refresh.
    assert_eq!(app.spotify.refresh_call_count(), 0);
}

#[tokio::test]
async fn test_refresh_failure_maps_to_401() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "stale-token", "revoked-refresh")
        .await;
    app.spotify.script_search_tracks(Err(mock::unauthorized()));
    app.spotify
        .script_refresh(Err(mock::api_error(400, "Refresh token revoked")));

    let response = app
        .get("/spotify/searchTracks?query=beatles", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.body["message"], "spotify client refresh token error");
    assert_eq!(response.body["details"]["message"], "Refresh token revoked");

    // No retry after a failed refresh.
    assert_eq!(app.spotify.search_tracks_calls().len(), 1);
}

#[tokio::test]
async fn test_spotify_endpoints_require_bearer_token() {
    let app = helpers::TestApp::new();

    let response = app.get("/spotify/searchTracks?query=beatles", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_spotify_endpoints_require_linked_account() {
    let app = helpers::TestApp::new();
    // Valid session token, but no provider tokens behind it.
    let token = app
        .jwt_encoder
        .issue_access_token(&UserId::new("ghost"))
        .unwrap();

    let response = app
        .get("/spotify/searchTracks?query=beatles", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recommendations_applies_exclusion_filters() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;

    let liked = mock::track("t1", "Already Saved");
    let recent = mock::track("t2", "Heard Yesterday");
    let fresh = mock::track("t3", "New To Me");
    app.spotify
        .script_recommendations(Ok(vec![liked, recent.clone(), fresh]));
    app.spotify
        .script_contains_saved(Ok(vec![true, false, false]));
    app.spotify
        .script_recently_played(Ok(vec![mock::history_item(recent)]));

    let response = app
        .post_json(
            "/spotify/recommendations",
            json!({
                "seed_artists": ["a1"],
                "min_energy": 0.4,
                "excludeLiked": true,
                "excludeRecent": true
            }),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let tracks = response.body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["id"], "t3");

    // The provider query carried the seeds, bounds, and fixed limit.
    let calls = app.spotify.recommendations_calls();
    assert_eq!(calls.len(), 1);
    let options = &calls[0].1;
    assert_eq!(options.limit, Some(20));
    assert_eq!(options.seed_artists, vec!["a1".to_string()]);
    assert_eq!(options.min_energy, Some(0.4));

    // Liked-filter asked about exactly the recommended ids, in order.
    assert_eq!(
        app.spotify.contains_saved_calls(),
        vec![(
            "provider-access".to_string(),
            vec!["t1".to_string(), "t2".to_string(), "t3".to_string()]
        )]
    );

    // Recent-filter consulted the fifty-play history window.
    assert_eq!(
        app.spotify.recently_played_calls(),
        vec![("provider-access".to_string(), 50)]
    );
}

#[tokio::test]
async fn test_recommendations_skips_filters_when_flags_absent() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify.script_recommendations(Ok(vec![
        mock::track("t1", "One"),
        mock::track("t2", "Two"),
    ]));

    let response = app
        .post_json("/spotify/recommendations", json!({}), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tracks"].as_array().unwrap().len(), 2);
    assert!(app.spotify.contains_saved_calls().is_empty());
    assert!(app.spotify.recently_played_calls().is_empty());
}

#[tokio::test]
async fn test_recommendations_validates_audio_feature_bounds() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;

    let response = app
        .post_json(
            "/spotify/recommendations",
            json!({"min_energy": 2.5}),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.spotify.recommendations_calls().is_empty());
}

#[tokio::test]
async fn test_play_tracks_starts_playback() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify.script_play(Ok(()));

    let response = app
        .get(
            "/spotify/playTracks?uris=spotify:track:t1,spotify:track:t2",
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        app.spotify.play_calls(),
        vec![(
            "provider-access".to_string(),
            vec!["spotify:track:t1".to_string(), "spotify:track:t2".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_play_tracks_recovers_through_device_transfer() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify.script_play(Err(mock::api_error(404, NO_DEVICE)));
    app.spotify
        .script_devices(Ok(vec![mock::device("d1", "Web Player")]));
    app.spotify.script_transfer(Ok(()));
    app.spotify.script_play(Ok(()));

    let response = app
        .get("/spotify/playTracks?uris=spotify:track:t1", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);

    // One transfer to the first device, then the same play again.
    assert_eq!(
        app.spotify.transfer_calls(),
        vec![("provider-access".to_string(), "d1".to_string())]
    );
    let plays = app.spotify.play_calls();
    assert_eq!(plays.len(), 2);
    assert_eq!(plays[0].1, plays[1].1);
}

#[tokio::test]
async fn test_play_tracks_propagates_original_error_when_no_devices() {
    let app = helpers::TestApp::new();
    let token = app
        .link_user("wizzler", "provider-access", "provider-refresh")
        .await;
    app.spotify.script_play(Err(mock::api_error(404, NO_DEVICE)));
    app.spotify.script_devices(Ok(vec![]));

    let response = app
        .get("/spotify/playTracks?uris=spotify:track:t1", Some(&token))
        .await;

    // The caller sees the original playback failure, not the recovery's.
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], "spotify client error");
    assert_eq!(response.body["details"]["message"], NO_DEVICE);
    assert!(app.spotify.transfer_calls().is_empty());
}
