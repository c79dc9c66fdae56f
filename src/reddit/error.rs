//! Reddit adapter error types.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RedditError {
    /// Non-2xx response; the message carries the upstream detail.
    #[error("Reddit API error ({status}): {message}")]
    #[diagnostic(code(toolgate::reddit::upstream))]
    Upstream { status: u16, message: String },

    /// HTTP 429. Handled internally by a single delayed retry; surfaces as
    /// `Upstream` if it recurs.
    #[error("Rate limited by Reddit (HTTP 429)")]
    #[diagnostic(code(toolgate::reddit::rate_limited))]
    RateLimited { retry_after: Option<u64> },

    #[error("Validation error: {message}")]
    #[diagnostic(code(toolgate::reddit::validation))]
    Validation { message: String },

    #[error("Request failed: {0}")]
    #[diagnostic(code(toolgate::reddit::transport))]
    Transport(#[from] reqwest::Error),
}

impl RedditError {
    pub fn validation(message: impl Into<String>) -> Self {
        RedditError::Validation {
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        RedditError::Upstream {
            status,
            message: message.into(),
        }
    }
}

/// Result type for Reddit operations.
pub type RedditResult<T> = Result<T, RedditError>;
