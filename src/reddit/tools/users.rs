//! MCP tools for inspecting Reddit users.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::mcp::{error_result, text_result};
use crate::reddit::error::{RedditError, RedditResult};
use crate::reddit::model::{flatten_comments, posts_from_listing, user_summary};
use crate::reddit::server::RedditServer;

use super::apply_limit;

fn validate_username(name: &str) -> RedditResult<&str> {
    let trimmed = name.trim().trim_start_matches("u/");
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RedditError::validation(format!(
            "invalid username '{name}'"
        )));
    }
    Ok(trimmed)
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetUserParams {
    #[schemars(description = "Username, with or without the u/ prefix")]
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetUserContentParams {
    #[schemars(description = "Username, with or without the u/ prefix")]
    pub username: String,
    #[schemars(description = "Maximum entries to return (default: 10, max: 100)")]
    pub limit: Option<u32>,
}

#[tool_router(router = user_router, vis = "pub(crate)")]
impl RedditServer {
    #[tool(description = "Get a user's profile: karma, age, moderator status.")]
    pub async fn get_user_overview(
        &self,
        params: Parameters<GetUserParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = match validate_username(&params.0.username) {
            Ok(name) => name,
            Err(err) => return Ok(error_result(err)),
        };

        match self
            .client
            .get_json(&format!("/user/{username}/about"), &[])
            .await
        {
            Ok(about) => Ok(text_result(&user_summary(&about))),
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(description = "Get a user's submitted posts, newest first.")]
    pub async fn get_user_posts(
        &self,
        params: Parameters<GetUserContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = match validate_username(&params.0.username) {
            Ok(name) => name,
            Err(err) => return Ok(error_result(err)),
        };
        let limit = apply_limit(params.0.limit);

        match self
            .client
            .get_json(
                &format!("/user/{username}/submitted"),
                &[("limit", limit.to_string())],
            )
            .await
        {
            Ok(listing) => Ok(text_result(&json!({
                "username": username,
                "posts": posts_from_listing(&listing),
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(description = "Get a user's comments, newest first.")]
    pub async fn get_user_comments(
        &self,
        params: Parameters<GetUserContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = match validate_username(&params.0.username) {
            Ok(name) => name,
            Err(err) => return Ok(error_result(err)),
        };
        let limit = apply_limit(params.0.limit);

        match self
            .client
            .get_json(
                &format!("/user/{username}/comments"),
                &[("limit", limit.to_string())],
            )
            .await
        {
            Ok(listing) => Ok(text_result(&json!({
                "username": username,
                "comments": flatten_comments(&listing, limit as usize),
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }
}
