use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    matching::SearchError,
    types::{Token, TokenResponse},
};

/// App-level access token for the Spotify Web API (client credentials grant).
///
/// The token lives in memory only; a fresh one is requested on first use and
/// whenever the current one is about to expire. Concurrent callers share the
/// same token, the mutex makes sure only one of them hits the token endpoint.
pub struct TokenManager {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(client: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        TokenManager {
            client,
            token_url,
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }

    pub async fn get_valid_token(&self) -> Result<String, SearchError> {
        let mut current = self.token.lock().await;

        if let Some(token) = current.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *current = Some(fresh);
        Ok(access_token)
    }

    /// Forgets the current token, e.g. after the API rejected it with 401.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    async fn request_token(&self) -> Result<Token, SearchError> {
        let res = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SearchError::Unauthorized(format!(
                "token request failed with {}: {}",
                status, body
            )));
        }

        let json: TokenResponse = res.json().await?;
        tracing::debug!(expires_in = json.expires_in, "Obtained Spotify access token.");

        Ok(Token {
            access_token: json.access_token,
            token_type: json.token_type,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
