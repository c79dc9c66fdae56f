//! Tests for the Reddit HTTP client (no network).

use crate::reddit::{Credentials, RedditClient};

fn creds() -> Credentials {
    Credentials {
        client_id: "cid".to_string(),
        client_secret: "sec".to_string(),
        username: Some("user".to_string()),
        password: Some("pass".to_string()),
    }
}

#[test]
fn test_anonymous_endpoints_get_json_suffix_on_public_host() {
    let client = RedditClient::new(None, "test-agent".to_string());
    assert!(!client.is_authenticated());
    assert_eq!(
        client.endpoint("/r/rust/hot"),
        "https://www.reddit.com/r/rust/hot.json"
    );
    // A path that already carries .json is left alone.
    assert_eq!(
        client.endpoint("/r/rust/hot.json"),
        "https://www.reddit.com/r/rust/hot.json"
    );
}

#[test]
fn test_authenticated_endpoints_use_oauth_host_without_suffix() {
    let client = RedditClient::new(Some(creds()), "test-agent".to_string());
    assert!(client.is_authenticated());
    assert_eq!(
        client.endpoint("/r/rust/hot"),
        "https://oauth.reddit.com/r/rust/hot"
    );
    assert_eq!(
        client.endpoint("/api/submit"),
        "https://oauth.reddit.com/api/submit"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_form_without_credentials_is_a_validation_error() {
    let client = RedditClient::new(None, "test-agent".to_string());
    let err = client
        .post_form("/api/vote", &[("id", "t3_abc".to_string())])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("requires Reddit credentials"));
}
