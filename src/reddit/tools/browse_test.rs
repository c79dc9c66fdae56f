//! Tests for browse tool validation paths (no network).

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;

use crate::reddit::server::RedditServer;
use crate::reddit::tools::browse::{GetPostCommentsParams, GetSubredditPostsParams};
use crate::reddit::RedditClient;

fn anonymous_server() -> RedditServer {
    RedditServer::new(Arc::new(RedditClient::new(None, "test-agent".to_string())))
}

fn content_text(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("expected text content"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_subreddit_posts_rejects_bad_subreddit() {
    let server = anonymous_server();
    let result = server
        .get_subreddit_posts(Parameters(GetSubredditPostsParams {
            subreddit: "rust/hot".to_string(),
            sort: None,
            time: None,
            limit: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("invalid subreddit"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_subreddit_posts_rejects_unknown_sort() {
    let server = anonymous_server();
    let result = server
        .get_subreddit_posts(Parameters(GetSubredditPostsParams {
            subreddit: "rust".to_string(),
            sort: Some("best".to_string()),
            time: None,
            limit: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("invalid sort"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_post_comments_rejects_wrong_fullname_kind() {
    let server = anonymous_server();
    let result = server
        .get_post_comments(Parameters(GetPostCommentsParams {
            post_id: "t1_abc123".to_string(),
            limit: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("t3_"));
}
