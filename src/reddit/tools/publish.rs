//! MCP tools that write to Reddit: submit, comment, edit, delete, vote.
//!
//! All of these require configured credentials with a username/password
//! pair; the client rejects them otherwise. With `api_type=json` Reddit
//! reports field errors inside a 200 response, so each handler checks the
//! embedded error list as well.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::mcp::{error_result, text_result};
use crate::reddit::model::{Fullname, FullnameKind, VoteDirection};
use crate::reddit::server::RedditServer;

use super::validate_subreddit;

/// Collect `json.errors` entries from an `api_type=json` response.
fn api_errors(response: &Value) -> Option<String> {
    let errors = response["json"]["errors"].as_array()?;
    if errors.is_empty() {
        return None;
    }
    let rendered: Vec<String> = errors
        .iter()
        .map(|entry| {
            entry
                .as_array()
                .map(|parts| {
                    parts
                        .iter()
                        .filter_map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(": ")
                })
                .unwrap_or_else(|| entry.to_string())
        })
        .collect();
    Some(format!("Reddit rejected the request: {}", rendered.join("; ")))
}

/// Parse a fullname that may be either a post or a comment.
fn parse_editable(value: &str) -> Result<Fullname, crate::reddit::RedditError> {
    let fullname = Fullname::parse(value)?;
    match fullname.kind() {
        FullnameKind::Link | FullnameKind::Comment => Ok(fullname),
        _ => Err(crate::reddit::RedditError::validation(format!(
            "expected a t1_ or t3_ fullname, got '{value}'"
        ))),
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SubmitPostParams {
    #[schemars(description = "Subreddit to post to, with or without the r/ prefix")]
    pub subreddit: String,
    #[schemars(description = "Post title")]
    pub title: String,
    #[schemars(description = "Body for a text post. Exactly one of text or url must be set.")]
    pub text: Option<String>,
    #[schemars(description = "Link for a link post. Exactly one of text or url must be set.")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SubmitCommentParams {
    #[schemars(
        description = "Fullname of the thing to reply to: t3_ for a post, t1_ for a comment"
    )]
    pub parent_fullname: String,
    #[schemars(description = "Comment body (markdown)")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EditContentParams {
    #[schemars(description = "Fullname of your post (t3_) or comment (t1_) to edit")]
    pub fullname: String,
    #[schemars(description = "Replacement body (markdown)")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteContentParams {
    #[schemars(description = "Fullname of your post (t3_) or comment (t1_) to delete")]
    pub fullname: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VoteParams {
    #[schemars(description = "Fullname of the post (t3_) or comment (t1_) to vote on")]
    pub fullname: String,
    #[schemars(description = "1 to upvote, -1 to downvote, 0 to clear your vote")]
    pub direction: i64,
}

#[tool_router(router = publish_router, vis = "pub(crate)")]
impl RedditServer {
    #[tool(
        description = "Submit a new post to a subreddit: a text post (text) or a link post (url). Requires credentials."
    )]
    pub async fn submit_post(
        &self,
        params: Parameters<SubmitPostParams>,
    ) -> Result<CallToolResult, McpError> {
        let subreddit = match validate_subreddit(&params.0.subreddit) {
            Ok(name) => name.to_string(),
            Err(err) => return Ok(error_result(err)),
        };
        if params.0.title.trim().is_empty() {
            return Ok(error_result("Validation error: post title is empty"));
        }

        let mut form = vec![
            ("api_type", "json".to_string()),
            ("sr", subreddit),
            ("title", params.0.title.clone()),
        ];
        match (&params.0.text, &params.0.url) {
            (Some(text), None) => {
                form.push(("kind", "self".to_string()));
                form.push(("text", text.clone()));
            }
            (None, Some(url)) => {
                form.push(("kind", "link".to_string()));
                form.push(("url", url.clone()));
            }
            _ => {
                return Ok(error_result(
                    "Validation error: provide exactly one of text (self post) or url (link post)",
                ));
            }
        }

        match self.client.post_form("/api/submit", &form).await {
            Ok(response) => match api_errors(&response) {
                Some(message) => Ok(error_result(message)),
                None => Ok(text_result(&json!({
                    "submitted": response["json"]["data"],
                }))),
            },
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Reply to a post (t3_ fullname) or a comment (t1_ fullname). Requires credentials."
    )]
    pub async fn submit_comment(
        &self,
        params: Parameters<SubmitCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        let parent = match parse_editable(&params.0.parent_fullname) {
            Ok(fullname) => fullname,
            Err(err) => return Ok(error_result(err)),
        };
        if params.0.text.trim().is_empty() {
            return Ok(error_result("Validation error: comment body is empty"));
        }

        let form = vec![
            ("api_type", "json".to_string()),
            ("thing_id", parent.as_str().to_string()),
            ("text", params.0.text.clone()),
        ];
        match self.client.post_form("/api/comment", &form).await {
            Ok(response) => match api_errors(&response) {
                Some(message) => Ok(error_result(message)),
                None => Ok(text_result(&json!({
                    "commented": response["json"]["data"],
                }))),
            },
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(description = "Edit the body of your own post or comment. Requires credentials.")]
    pub async fn edit_content(
        &self,
        params: Parameters<EditContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let fullname = match parse_editable(&params.0.fullname) {
            Ok(fullname) => fullname,
            Err(err) => return Ok(error_result(err)),
        };

        let form = vec![
            ("api_type", "json".to_string()),
            ("thing_id", fullname.as_str().to_string()),
            ("text", params.0.text.clone()),
        ];
        match self.client.post_form("/api/editusertext", &form).await {
            Ok(response) => match api_errors(&response) {
                Some(message) => Ok(error_result(message)),
                None => Ok(text_result(&json!({"edited": fullname.as_str()}))),
            },
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(description = "Delete your own post or comment. Requires credentials.")]
    pub async fn delete_content(
        &self,
        params: Parameters<DeleteContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let fullname = match parse_editable(&params.0.fullname) {
            Ok(fullname) => fullname,
            Err(err) => return Ok(error_result(err)),
        };

        let form = vec![("id", fullname.as_str().to_string())];
        match self.client.post_form("/api/del", &form).await {
            Ok(_) => Ok(text_result(&json!({"deleted": fullname.as_str()}))),
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Vote on a post or comment: 1 up, -1 down, 0 to clear. Requires credentials. Votes must reflect a human's intent, per Reddit's rules."
    )]
    pub async fn vote(&self, params: Parameters<VoteParams>) -> Result<CallToolResult, McpError> {
        let fullname = match parse_editable(&params.0.fullname) {
            Ok(fullname) => fullname,
            Err(err) => return Ok(error_result(err)),
        };
        let direction = match VoteDirection::try_from(params.0.direction) {
            Ok(direction) => direction,
            Err(err) => return Ok(error_result(err)),
        };

        let form = vec![
            ("id", fullname.as_str().to_string()),
            ("dir", direction.as_i8().to_string()),
        ];
        match self.client.post_form("/api/vote", &form).await {
            Ok(_) => Ok(text_result(&json!({
                "voted": fullname.as_str(),
                "direction": direction.as_i8(),
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }
}
