//! Tests for shared tool parameter helpers.

use super::{apply_limit, validate_choice, validate_subreddit};

#[test]
fn test_apply_limit_default_and_clamping() {
    assert_eq!(apply_limit(None), 10);
    assert_eq!(apply_limit(Some(25)), 25);
    assert_eq!(apply_limit(Some(0)), 1);
    assert_eq!(apply_limit(Some(10_000)), 100);
}

#[test]
fn test_validate_choice_default_and_allowlist() {
    let sorts = &["hot", "new", "top"];
    assert_eq!(validate_choice("sort", None, sorts, "hot").unwrap(), "hot");
    assert_eq!(validate_choice("sort", Some("new"), sorts, "hot").unwrap(), "new");

    let err = validate_choice("sort", Some("best"), sorts, "hot").unwrap_err();
    assert!(err.to_string().contains("invalid sort 'best'"));
    assert!(err.to_string().contains("hot, new, top"));
}

#[test]
fn test_validate_subreddit_strips_prefix() {
    assert_eq!(validate_subreddit("rust").unwrap(), "rust");
    assert_eq!(validate_subreddit("r/rust").unwrap(), "rust");
    assert_eq!(validate_subreddit(" r/ask_science ").unwrap(), "ask_science");
}

#[test]
fn test_validate_subreddit_rejects_path_characters() {
    assert!(validate_subreddit("").is_err());
    assert!(validate_subreddit("r/").is_err());
    assert!(validate_subreddit("rust/hot").is_err());
    assert!(validate_subreddit("ru st").is_err());
    assert!(validate_subreddit("../admin").is_err());
}
