//! MCP tools for searching Reddit.

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
use crate::reddit::model::posts_from_listing;
use crate::reddit::server::RedditServer;

use super::{apply_limit, validate_choice, validate_subreddit};

const SEARCH_SORTS: &[&str] = &["relevance", "hot", "new", "top", "comments"];
const TIME_WINDOWS: &[&str] = &["hour", "day", "week", "month", "year", "all"];

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchPostsParams {
    #[schemars(description = "Search query")]
    pub query: String,
    #[schemars(description = "Restrict the search to one subreddit (optional)")]
    pub subreddit: Option<String>,
    #[schemars(
        description = "Sort order: 'relevance' (default), 'hot', 'new', 'top', 'comments'"
    )]
    pub sort: Option<String>,
    #[schemars(
        description = "Time window: 'hour', 'day', 'week', 'month', 'year', 'all' (default)"
    )]
    pub time: Option<String>,
    #[schemars(description = "Maximum posts to return (default: 10, max: 100)")]
    pub limit: Option<u32>,
}

#[tool_router(router = search_router, vis = "pub(crate)")]
impl RedditServer {
    #[tool(
        description = "Search Reddit posts, site-wide or within one subreddit. Returns compact post objects."
    )]
    pub async fn search_posts(
        &self,
        params: Parameters<SearchPostsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query_text = params.0.query.trim();
        if query_text.is_empty() {
            return Ok(error_result("Validation error: search query is empty"));
        }
        let sort = match validate_choice("sort", params.0.sort.as_deref(), SEARCH_SORTS, "relevance")
        {
            Ok(sort) => sort,
            Err(err) => return Ok(error_result(err)),
        };
        let time = match validate_choice("time window", params.0.time.as_deref(), TIME_WINDOWS, "all")
        {
            Ok(time) => time,
            Err(err) => return Ok(error_result(err)),
        };

        let mut search_query = vec![
            ("q", query_text.to_string()),
            ("sort", sort.clone()),
            ("t", time),
            ("limit", apply_limit(params.0.limit).to_string()),
            ("type", "link".to_string()),
        ];

        let path = match &params.0.subreddit {
            Some(subreddit) => {
                let name = match validate_subreddit(subreddit) {
                    Ok(name) => name,
                    Err(err) => return Ok(error_result(err)),
                };
                search_query.push(("restrict_sr", "on".to_string()));
                format!("/r/{name}/search")
            }
            None => "/search".to_string(),
        };

        match self.client.get_json(&path, &search_query).await {
            Ok(listing) => Ok(text_result(&json!({
                "query": query_text,
                "sort": sort,
                "subreddit": params.0.subreddit,
                "posts": posts_from_listing(&listing),
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }
}
