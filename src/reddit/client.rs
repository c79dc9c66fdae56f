//! HTTP client for the Reddit API.
//!
//! With credentials configured, requests go to `oauth.reddit.com` with a
//! bearer token; without them, to the public `www.reddit.com` `.json`
//! endpoints (read-only). Either way the configured User-Agent is always
//! sent; Reddit throttles unidentified clients aggressively.

use std::time::Duration;

use serde_json::Value;

use super::auth::{Credentials, TokenManager};
use super::error::{RedditError, RedditResult};

const OAUTH_BASE: &str = "https://oauth.reddit.com";
const PUBLIC_BASE: &str = "https://www.reddit.com";

/// Delay before the single 429 retry when Reddit sends no Retry-After.
const RETRY_AFTER_FALLBACK: Duration = Duration::from_secs(2);

pub struct RedditClient {
    http: reqwest::Client,
    auth: Option<TokenManager>,
    user_agent: String,
}

impl RedditClient {
    /// Create a client; `creds` of `None` selects anonymous read-only mode.
    pub fn new(creds: Option<Credentials>, user_agent: String) -> Self {
        let http = reqwest::Client::new();
        let auth = creds.map(|c| TokenManager::new(http.clone(), c, user_agent.clone()));
        Self {
            http,
            auth,
            user_agent,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Full URL for an API path. Anonymous mode appends `.json`, which the
    /// public listing endpoints require.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        if self.auth.is_some() {
            format!("{OAUTH_BASE}{path}")
        } else if path.ends_with(".json") {
            format!("{PUBLIC_BASE}{path}")
        } else {
            format!("{PUBLIC_BASE}{path}.json")
        }
    }

    /// GET a JSON document.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> RedditResult<Value> {
        let mut request = self
            .http
            .get(self.endpoint(path))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(query);
        if let Some(auth) = &self.auth {
            request = request.bearer_auth(auth.bearer().await?);
        }
        let response = send_retrying_429(request).await?;
        Ok(response.json().await?)
    }

    /// POST a form to a write endpoint. Requires credentials.
    pub async fn post_form(&self, path: &str, form: &[(&str, String)]) -> RedditResult<Value> {
        let auth = self.auth.as_ref().ok_or_else(|| {
            RedditError::validation(
                "this tool requires Reddit credentials; configure client_id, client_secret, \
                 username and password",
            )
        })?;
        let request = self
            .http
            .post(self.endpoint(path))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .bearer_auth(auth.bearer().await?)
            .form(form);
        let response = send_retrying_429(request).await?;
        Ok(response.json().await?)
    }
}

/// Send a request, retrying exactly once after a 429.
///
/// The delay is the `Retry-After` header when it parses, otherwise a fixed
/// two seconds. No exponential backoff, no jitter, no retry budget: a
/// second 429 propagates as an upstream error.
pub(crate) async fn send_retrying_429(
    request: reqwest::RequestBuilder,
) -> RedditResult<reqwest::Response> {
    let retry = request.try_clone();
    match send_once(request).await {
        Err(RedditError::RateLimited { retry_after }) => {
            let Some(retry_request) = retry else {
                return Err(RedditError::upstream(
                    429,
                    "rate limited and the request body cannot be replayed",
                ));
            };
            let delay = retry_after
                .map(Duration::from_secs)
                .unwrap_or(RETRY_AFTER_FALLBACK);
            tracing::warn!("rate limited by Reddit, retrying once in {delay:?}");
            tokio::time::sleep(delay).await;
            match send_once(retry_request).await {
                Err(RedditError::RateLimited { .. }) => {
                    Err(RedditError::upstream(429, "still rate limited after one retry"))
                }
                other => other,
            }
        }
        other => other,
    }
}

async fn send_once(request: reqwest::RequestBuilder) -> RedditResult<reqwest::Response> {
    let response = request.send().await?;
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        return Err(RedditError::RateLimited { retry_after });
    }
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no error detail".to_string());
        return Err(RedditError::Upstream {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}
