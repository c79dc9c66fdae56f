//! OAuth token management.
//!
//! Reddit's token endpoint takes Basic auth with the app's client id and
//! secret. With a username/password pair configured the password grant is
//! used (required for write endpoints); otherwise the client-credentials
//! grant. The token is cached until shortly before expiry and refreshed on
//! demand.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use super::client::send_retrying_429;
use super::error::RedditResult;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Refresh this long before the advertised expiry.
const EXPIRY_SLACK_SECS: u64 = 60;

/// Reddit API credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Form body for the token request; the grant type follows from
    /// whether a username/password pair is present.
    pub(crate) fn grant_form(&self) -> Vec<(&'static str, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => vec![
                ("grant_type", "password".to_string()),
                ("username", username.clone()),
                ("password", password.clone()),
            ],
            _ => vec![("grant_type", "client_credentials".to_string())],
        }
    }
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Fetches and caches OAuth bearer tokens.
pub struct TokenManager {
    http: reqwest::Client,
    creds: Credentials,
    user_agent: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, creds: Credentials, user_agent: String) -> Self {
        Self {
            http,
            creds,
            user_agent,
            cached: Mutex::new(None),
        }
    }

    /// A bearer token that is valid now, refreshing if needed.
    pub async fn bearer(&self) -> RedditResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    async fn fetch_token(&self) -> RedditResult<CachedToken> {
        tracing::debug!("refreshing Reddit access token");
        let request = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.creds.client_id, Some(&self.creds.client_secret))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(&self.creds.grant_form());

        let payload: TokenResponse = send_retrying_429(request).await?.json().await?;
        Ok(CachedToken {
            token: payload.access_token,
            expires_at: Instant::now()
                + Duration::from_secs(payload.expires_in.saturating_sub(EXPIRY_SLACK_SECS)),
        })
    }
}
