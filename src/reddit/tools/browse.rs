//! MCP tools for browsing subreddits and comment threads.

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
use crate::reddit::model::{Fullname, FullnameKind, flatten_comments, posts_from_listing};
use crate::reddit::server::RedditServer;

use super::{apply_limit, validate_choice, validate_subreddit};

const POST_SORTS: &[&str] = &["hot", "new", "rising", "top", "controversial"];
const TIME_WINDOWS: &[&str] = &["hour", "day", "week", "month", "year", "all"];

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetSubredditPostsParams {
    #[schemars(description = "Subreddit name, with or without the r/ prefix")]
    pub subreddit: String,
    #[schemars(description = "Sort order: 'hot' (default), 'new', 'rising', 'top', 'controversial'")]
    pub sort: Option<String>,
    #[schemars(
        description = "Time window for 'top' and 'controversial': 'hour', 'day' (default), 'week', 'month', 'year', 'all'"
    )]
    pub time: Option<String>,
    #[schemars(description = "Maximum posts to return (default: 10, max: 100)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetPostCommentsParams {
    #[schemars(description = "Post id, bare ('abc123') or as a t3_ fullname")]
    pub post_id: String,
    #[schemars(description = "Maximum comments to return across the thread (default: 10, max: 100)")]
    pub limit: Option<u32>,
}

#[tool_router(router = browse_router, vis = "pub(crate)")]
impl RedditServer {
    #[tool(
        description = "Get posts from a subreddit, sorted by hot/new/rising/top/controversial. Returns compact post objects including the t3_ fullname needed for comments and votes."
    )]
    pub async fn get_subreddit_posts(
        &self,
        params: Parameters<GetSubredditPostsParams>,
    ) -> Result<CallToolResult, McpError> {
        let subreddit = match validate_subreddit(&params.0.subreddit) {
            Ok(name) => name,
            Err(err) => return Ok(error_result(err)),
        };
        let sort = match validate_choice("sort", params.0.sort.as_deref(), POST_SORTS, "hot") {
            Ok(sort) => sort,
            Err(err) => return Ok(error_result(err)),
        };
        let time = match validate_choice("time window", params.0.time.as_deref(), TIME_WINDOWS, "day")
        {
            Ok(time) => time,
            Err(err) => return Ok(error_result(err)),
        };

        let limit = apply_limit(params.0.limit);
        let mut query = vec![("limit", limit.to_string())];
        if sort == "top" || sort == "controversial" {
            query.push(("t", time));
        }

        match self
            .client
            .get_json(&format!("/r/{subreddit}/{sort}"), &query)
            .await
        {
            Ok(listing) => Ok(text_result(&json!({
                "subreddit": subreddit,
                "sort": sort,
                "posts": posts_from_listing(&listing),
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Get a post and its comment tree, flattened depth-first with a depth field per comment. Unexpanded 'more' stubs are skipped."
    )]
    pub async fn get_post_comments(
        &self,
        params: Parameters<GetPostCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let fullname = match Fullname::ensure(FullnameKind::Link, &params.0.post_id) {
            Ok(fullname) => fullname,
            Err(err) => return Ok(error_result(err)),
        };
        let limit = apply_limit(params.0.limit);

        let response = match self
            .client
            .get_json(
                &format!("/comments/{}", fullname.id()),
                &[("limit", limit.to_string())],
            )
            .await
        {
            Ok(response) => response,
            Err(err) => return Ok(error_result(err)),
        };

        // The endpoint returns a two-element array: the post listing and
        // the comment listing.
        let post = posts_from_listing(&response[0]).into_iter().next();
        let comments = flatten_comments(&response[1], limit as usize);

        Ok(text_result(&json!({
            "post": post,
            "comments": comments,
        })))
    }
}
