//! Tool result helpers.
//!
//! Every tool answers with a JSON text content block; every failure becomes
//! an error result carrying the original message, so nothing is silently
//! swallowed on the way back to the client.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Serialize `value` as pretty JSON into a successful text result.
pub fn text_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => error_result(err),
    }
}

/// Wrap an error message in an `is_error` text result.
pub fn error_result(err: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}
