//! Tests for publish tool validation paths (no network).

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;

use crate::reddit::RedditClient;
use crate::reddit::server::RedditServer;
use crate::reddit::tools::publish::{SubmitCommentParams, SubmitPostParams, VoteParams};

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
async fn test_submit_post_requires_exactly_one_body_kind() {
    let server = anonymous_server();

    let both = server
        .submit_post(Parameters(SubmitPostParams {
            subreddit: "rust".to_string(),
            title: "Title".to_string(),
            text: Some("body".to_string()),
            url: Some("https://example.com".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(both.is_error, Some(true));
    assert!(content_text(&both).contains("exactly one"));

    let neither = server
        .submit_post(Parameters(SubmitPostParams {
            subreddit: "rust".to_string(),
            title: "Title".to_string(),
            text: None,
            url: None,
        }))
        .await
        .unwrap();
    assert_eq!(neither.is_error, Some(true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_post_without_credentials_is_rejected() {
    let server = anonymous_server();
    let result = server
        .submit_post(Parameters(SubmitPostParams {
            subreddit: "rust".to_string(),
            title: "Title".to_string(),
            text: Some("body".to_string()),
            url: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("requires Reddit credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_comment_rejects_non_replyable_parent() {
    let server = anonymous_server();
    let result = server
        .submit_comment(Parameters(SubmitCommentParams {
            parent_fullname: "t5_2qh1i".to_string(),
            text: "hi".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("t1_ or t3_"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vote_rejects_out_of_range_direction() {
    let server = anonymous_server();
    let result = server
        .vote(Parameters(VoteParams {
            fullname: "t3_abc123".to_string(),
            direction: 5,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("1, 0 or -1"));
}
