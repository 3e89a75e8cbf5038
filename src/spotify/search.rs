use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    management::TokenManager,
    matching::{SearchError, TrackSearch},
    types::{CandidateTrack, SearchResponse},
};

/// Longest `Retry-After` we are willing to sit through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 5;

/// [`TrackSearch`] backed by the Spotify Web API `/search` endpoint.
pub struct SpotifySearch {
    client: Client,
    tokens: TokenManager,
    api_url: String,
    limit: u32,
    pages: u32,
    market: Option<String>,
}

impl SpotifySearch {
    pub fn new(client: Client, tokens: TokenManager, api_url: String) -> Self {
        Self {
            client,
            tokens,
            api_url,
            limit: config::DEFAULT_SEARCH_LIMIT,
            pages: config::DEFAULT_SEARCH_PAGES,
            market: None,
        }
    }

    /// Builds the client from the environment (see [`crate::config`]).
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let client = Client::new();
        let tokens = TokenManager::new(
            client.clone(),
            config::spotify_apitoken_url(),
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        );

        Ok(Self::new(client, tokens, config::spotify_apiurl())
            .with_limit(config::spotify_search_limit()?)
            .with_pages(config::spotify_search_pages()?)
            .with_market(config::spotify_search_market()))
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, 50);
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages.max(1);
        self
    }

    pub fn with_market(mut self, market: Option<String>) -> Self {
        self.market = market;
        self
    }

    /// Sends a request built by `build`, handling the transient statuses the
    /// API is known for.
    ///
    /// # Retry Logic
    ///
    /// - `429 Too Many Requests`: waits for `Retry-After` when it is at most
    ///   two minutes, otherwise gives up with [`SearchError::RateLimited`]
    /// - `502 Bad Gateway`: waits 10 seconds
    /// - `401 Unauthorized`: drops the cached token and asks for a new one
    ///
    /// Every other non-success status is returned as an error. After
    /// `MAX_ATTEMPTS` attempts the last failure is returned.
    async fn send<F>(&self, build: F) -> Result<SearchResponse, SearchError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.tokens.get_valid_token().await?;
            let response = build(&self.client).bearer_auth(token).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.json::<SearchResponse>().await?);
            }

            match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok())
                        .unwrap_or(1);

                    if retry_after > MAX_RETRY_AFTER_SECS || attempt >= MAX_ATTEMPTS {
                        tracing::warn!(retry_after, "Spotify rate limit too long, giving up on this search.");
                        return Err(SearchError::RateLimited { retry_after });
                    }
                    tracing::debug!(retry_after, "Rate limited by Spotify, waiting.");
                    sleep(Duration::from_secs(retry_after)).await;
                }
                StatusCode::BAD_GATEWAY if attempt < MAX_ATTEMPTS => {
                    tracing::debug!(attempt, "Spotify answered 502, retrying.");
                    sleep(BAD_GATEWAY_DELAY).await;
                }
                StatusCode::UNAUTHORIZED if attempt < MAX_ATTEMPTS => {
                    tracing::debug!("Spotify rejected the access token, renewing.");
                    self.tokens.invalidate().await;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(SearchError::Unauthorized(
                        "Spotify keeps rejecting the access token".to_string(),
                    ));
                }
                _ => {
                    // network or API error, propagate
                    return Err(response
                        .error_for_status()
                        .err()
                        .map(SearchError::Http)
                        .unwrap_or_else(|| SearchError::Unavailable(status.to_string())));
                }
            }
        }
    }
}

#[async_trait]
impl TrackSearch for SpotifySearch {
    /// Field-filtered track search, walking up to the configured number of
    /// result pages.
    async fn search(&self, artist: &str, title: &str) -> Result<Vec<CandidateTrack>, SearchError> {
        let query = build_query(artist, title);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let search_url = format!("{url}/search", url = self.api_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", query),
            ("type", "track".to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(market) = &self.market {
            params.push(("market", market.clone()));
        }

        let mut page = self
            .send(|client| client.get(&search_url).query(&params))
            .await?;
        let mut candidates: Vec<CandidateTrack> = Vec::new();

        for fetched in 1..=self.pages {
            let next = page.tracks.next.take();
            candidates.extend(page.tracks.items.drain(..).map(CandidateTrack::from));

            match next {
                Some(next_url) if fetched < self.pages => {
                    page = self.send(|client| client.get(&next_url)).await?;
                }
                _ => break,
            }
        }

        tracing::debug!(artist, title, count = candidates.len(), "Spotify search done.");
        Ok(candidates)
    }
}

/// Builds the `q` parameter, e.g. `artist:"Queen" track:"Bohemian Rhapsody"`.
///
/// Double quotes inside the values would end the phrase early and are dropped.
pub fn build_query(artist: &str, title: &str) -> String {
    let clean = |value: &str| value.replace('"', "").trim().to_string();
    let artist = clean(artist);
    let title = clean(title);

    let mut parts = Vec::new();
    if !artist.is_empty() {
        parts.push(format!("artist:\"{}\"", artist));
    }
    if !title.is_empty() {
        parts.push(format!("track:\"{}\"", title));
    }
    parts.join(" ")
}
