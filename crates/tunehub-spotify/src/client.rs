//! reqwest-backed implementation of the provider API.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::json;

use tunehub_core::config::spotify::SpotifyConfig;
use tunehub_core::error::{AppError, ErrorKind};
use tunehub_core::result::AppResult;

use crate::api::SpotifyApi;
use crate::error::SpotifyError;
use crate::model::{
    Artist, ArtistSearchPage, Device, DevicePage, Page, PlayHistoryItem, PrivateUser,
    RecommendationOptions, RecommendationsPage, TokenGrant, Track, TrackSearchPage,
};

/// HTTP client for the provider's accounts service and Web API.
#[derive(Clone)]
pub struct SpotifyWebClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    /// `<accounts_url>/authorize`, validated at construction.
    authorize_endpoint: Url,
    /// `<accounts_url>/api/token`, validated at construction.
    token_endpoint: Url,
    /// Web API base without a trailing slash.
    api_base: String,
}

impl std::fmt::Debug for SpotifyWebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyWebClient")
            .field("client_id", &self.client_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl SpotifyWebClient {
    /// Creates a client from configuration, validating the endpoint URLs up
    /// front so request paths never have to deal with bad configuration.
    pub fn new(config: &SpotifyConfig) -> AppResult<Self> {
        let accounts_base = config.accounts_url.trim_end_matches('/');

        let authorize_endpoint =
            Url::parse(&format!("{accounts_base}/authorize")).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid provider accounts URL", e)
            })?;
        let token_endpoint = Url::parse(&format!("{accounts_base}/api/token")).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid provider accounts URL", e)
        })?;
        Url::parse(&config.api_url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid provider API URL", e)
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.callback_url.clone(),
            scope: config.scope.clone(),
            authorize_endpoint,
            token_endpoint,
            api_base: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base)
    }

    /// POSTs the token endpoint with client-credential basic auth.
    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenGrant, SpotifyError> {
        let response = self
            .http
            .post(self.token_endpoint.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(params)
            .send()
            .await?;
        Self::response_json(response).await
    }

    /// Parses a success body as `T`; non-success statuses become
    /// [`SpotifyError::Api`] carrying whatever JSON the provider sent.
    async fn response_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SpotifyError> {
        let status = response.status();
        if !status.is_success() {
            let payload = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                payload,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Like [`Self::response_json`] for endpoints that answer 204.
    async fn expect_no_content(response: reqwest::Response) -> Result<(), SpotifyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let payload = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        Err(SpotifyError::Api {
            status: status.as_u16(),
            payload,
        })
    }
}

#[async_trait]
impl SpotifyApi for SpotifyWebClient {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", &self.scope)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, SpotifyError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenGrant, SpotifyError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn current_user(&self, access_token: &str) -> Result<PrivateUser, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("me"))
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::response_json(response).await
    }

    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("search"))
            .query(&[("q", query), ("type", "track")])
            .query(&[("limit", limit)])
            .bearer_auth(access_token)
            .send()
            .await?;
        let page: TrackSearchPage = Self::response_json(response).await?;
        Ok(page.tracks.items)
    }

    async fn search_artists(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("search"))
            .query(&[("q", query), ("type", "artist")])
            .query(&[("limit", limit)])
            .bearer_auth(access_token)
            .send()
            .await?;
        let page: ArtistSearchPage = Self::response_json(response).await?;
        Ok(page.artists.items)
    }

    async fn recommendations(
        &self,
        access_token: &str,
        options: &RecommendationOptions,
    ) -> Result<Vec<Track>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("recommendations"))
            .query(&options.to_query())
            .bearer_auth(access_token)
            .send()
            .await?;
        let page: RecommendationsPage = Self::response_json(response).await?;
        Ok(page.tracks)
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<PlayHistoryItem>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("me/player/recently-played"))
            .query(&[("limit", limit)])
            .bearer_auth(access_token)
            .send()
            .await?;
        let page: Page<PlayHistoryItem> = Self::response_json(response).await?;
        Ok(page.items)
    }

    async fn contains_saved_tracks(
        &self,
        access_token: &str,
        track_ids: &[String],
    ) -> Result<Vec<bool>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("me/tracks/contains"))
            .query(&[("ids", track_ids.join(","))])
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::response_json(response).await
    }

    async fn devices(&self, access_token: &str) -> Result<Vec<Device>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("me/player/devices"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let page: DevicePage = Self::response_json(response).await?;
        Ok(page.devices)
    }

    async fn transfer_playback(
        &self,
        access_token: &str,
        device_id: &str,
    ) -> Result<(), SpotifyError> {
        let response = self
            .http
            .put(self.endpoint("me/player"))
            .bearer_auth(access_token)
            .json(&json!({ "device_ids": [device_id] }))
            .send()
            .await?;
        Self::expect_no_content(response).await
    }

    async fn start_playback(
        &self,
        access_token: &str,
        uris: &[String],
    ) -> Result<(), SpotifyError> {
        let response = self
            .http
            .put(self.endpoint("me/player/play"))
            .bearer_auth(access_token)
            .json(&json!({ "uris": uris, "offset": { "position": 0 } }))
            .send()
            .await?;
        Self::expect_no_content(response).await
    }
}
