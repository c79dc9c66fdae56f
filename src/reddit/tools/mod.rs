//! Reddit tool implementations, split by concern.
//!
//! Each module contributes one `#[tool_router]` impl block to
//! `RedditServer`; the server combines the routers at construction.

pub mod browse;
pub mod publish;
pub mod search;
pub mod users;

#[cfg(test)]
mod browse_test;
#[cfg(test)]
mod helpers_test;
#[cfg(test)]
mod publish_test;

use crate::reddit::error::{RedditError, RedditResult};

pub(crate) const DEFAULT_LIMIT: u32 = 10;
pub(crate) const MAX_LIMIT: u32 = 100;

/// Clamp a requested listing size into `1..=MAX_LIMIT`.
pub(crate) fn apply_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Validate a sort (or time-window) value against the endpoint's allowlist.
pub(crate) fn validate_choice(
    what: &str,
    value: Option<&str>,
    allowed: &[&str],
    default: &'static str,
) -> RedditResult<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if allowed.contains(&v) => Ok(v.to_string()),
        Some(v) => Err(RedditError::validation(format!(
            "invalid {what} '{v}'; expected one of: {}",
            allowed.join(", ")
        ))),
    }
}

/// Subreddit names are path segments; reject anything that is not a plain
/// name before it reaches URL construction.
pub(crate) fn validate_subreddit(name: &str) -> RedditResult<&str> {
    let trimmed = name.trim().trim_start_matches("r/");
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(RedditError::validation(format!(
            "invalid subreddit name '{name}'"
        )));
    }
    Ok(trimmed)
}
