//! Shared test helpers for integration tests.
//!
//! Each test gets a full router wired to an in-memory cache and a
//! scriptable Spotify double, so requests run the real extractor,
//! handler, and executor paths end to end.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tunehub_api::state::AppState;
use tunehub_auth::jwt::decoder::JwtDecoder;
use tunehub_auth::jwt::encoder::JwtEncoder;
use tunehub_cache::{CacheManager, MemoryCacheProvider};
use tunehub_core::config::AppConfig;
use tunehub_core::config::cache::MemoryCacheConfig;
use tunehub_core::types::{ProviderTokens, UserId};
use tunehub_spotify::mock::MockSpotifyApi;
use tunehub_spotify::{SpotifyApi, SpotifyService, TokenStore};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Scriptable Spotify double backing the router
    pub spotify: Arc<MockSpotifyApi>,
    /// Direct handle on the provider token store
    pub tokens: TokenStore,
    /// Session token encoder for minting test JWTs
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Session token decoder for inspecting issued JWTs
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = test_config();

        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default()),
        )));

        let spotify_api = Arc::new(MockSpotifyApi::new());
        let tokens = TokenStore::new(Arc::clone(&cache));
        let spotify = Arc::new(SpotifyService::new(
            Arc::clone(&spotify_api) as Arc<dyn SpotifyApi>,
            tokens.clone(),
        ));

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let state = AppState {
            config: Arc::new(config.clone()),
            cache,
            jwt_encoder: Arc::clone(&jwt_encoder),
            jwt_decoder: Arc::clone(&jwt_decoder),
            spotify,
        };

        let router = tunehub_api::build_router(state);

        Self {
            router,
            spotify: spotify_api,
            tokens,
            jwt_encoder,
            jwt_decoder,
            config,
        }
    }

    /// Store provider tokens for a user and mint a session access token,
    /// as if they had completed the handshake earlier.
    pub async fn link_user(&self, user_id: &str, access: &str, refresh: &str) -> String {
        let user_id = UserId::new(user_id);
        self.tokens
            .save_tokens(
                &user_id,
                &ProviderTokens {
                    access_token: access.to_string(),
                    refresh_token: refresh.to_string(),
                },
            )
            .await
            .expect("Failed to store provider tokens");

        self.jwt_encoder
            .issue_access_token(&user_id)
            .expect("Failed to mint session token")
    }

    /// GET with an optional bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// GET with a raw `Cookie` header.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header("Cookie", cookie)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a JSON body with an optional bearer token.
    pub async fn post_json(&self, path: &str, body: Value, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        let req = req
            .body(Body::from(
                serde_json::to_string(&body).expect("Failed to serialize body"),
            ))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers (redirect location, cookies)
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` for empty or non-JSON bodies
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header of a redirect response.
    pub fn location(&self) -> &str {
        self.headers
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("No Location header")
    }

    /// All `Set-Cookie` header values.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    /// The value of a cookie set by this response, if any.
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.set_cookies().iter().find_map(|cookie| {
            let (pair, _) = cookie.split_once(';').unwrap_or((cookie.as_str(), ""));
            let (cookie_name, value) = pair.split_once('=')?;
            (cookie_name == name).then(|| value.to_string())
        })
    }
}

/// Config for tests: memory cache, fixed JWT secret, mock-friendly URLs.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.cache.provider = "memory".to_string();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.secure_cookies = false;
    config.spotify.client_id = "test-client-id".to_string();
    config.spotify.client_secret = "test-client-secret".to_string();
    config.spotify.app_url = "https://app.tunehub.test".to_string();
    config
}
