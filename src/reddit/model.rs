//! Reddit domain types and listing reshaping.
//!
//! Reddit wraps everything in `{kind, data}` envelopes and `Listing`
//! containers; the helpers here flatten those into compact objects the
//! tools return directly. Entity references are type-prefixed "fullnames"
//! (`t3_abc123` for a post, `t1_...` for a comment).

use serde_json::{Value, json};

use super::error::{RedditError, RedditResult};

/// Keep selftext previews bounded in tool output.
const SELFTEXT_PREVIEW_CHARS: usize = 2000;

/// Entity kind encoded in a fullname prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullnameKind {
    Comment,
    Account,
    Link,
    Message,
    Subreddit,
}

impl FullnameKind {
    pub fn prefix(self) -> &'static str {
        match self {
            FullnameKind::Comment => "t1",
            FullnameKind::Account => "t2",
            FullnameKind::Link => "t3",
            FullnameKind::Message => "t4",
            FullnameKind::Subreddit => "t5",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "t1" => Some(FullnameKind::Comment),
            "t2" => Some(FullnameKind::Account),
            "t3" => Some(FullnameKind::Link),
            "t4" => Some(FullnameKind::Message),
            "t5" => Some(FullnameKind::Subreddit),
            _ => None,
        }
    }
}

/// A validated type-prefixed entity id, e.g. `t3_abc123`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fullname(String);

impl Fullname {
    /// Parse a string that must already carry a known prefix.
    pub fn parse(value: &str) -> RedditResult<Self> {
        let (prefix, id) = value.split_once('_').ok_or_else(|| {
            RedditError::validation(format!(
                "'{value}' is not a fullname; expected a type prefix like t3_abc123"
            ))
        })?;
        if FullnameKind::from_prefix(prefix).is_none() {
            return Err(RedditError::validation(format!(
                "unknown fullname prefix '{prefix}' in '{value}'"
            )));
        }
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RedditError::validation(format!(
                "malformed fullname id in '{value}'"
            )));
        }
        Ok(Fullname(value.to_string()))
    }

    /// Accept either a bare id (prefixing it with `kind`) or a fullname
    /// already carrying exactly that prefix.
    pub fn ensure(kind: FullnameKind, value: &str) -> RedditResult<Self> {
        if value.contains('_') {
            let parsed = Self::parse(value)?;
            if parsed.kind() != kind {
                return Err(RedditError::validation(format!(
                    "expected a {}_ fullname, got '{value}'",
                    kind.prefix()
                )));
            }
            return Ok(parsed);
        }
        Self::parse(&format!("{}_{value}", kind.prefix()))
    }

    pub fn kind(&self) -> FullnameKind {
        let prefix = self.0.split('_').next().unwrap_or_default();
        FullnameKind::from_prefix(prefix).expect("validated at construction")
    }

    /// The bare id without the type prefix.
    pub fn id(&self) -> &str {
        self.0.split_once('_').map(|(_, id)| id).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fullname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vote direction as the API encodes it: 1, 0 (clear), -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Clear,
    Down,
}

impl VoteDirection {
    pub fn as_i8(self) -> i8 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Clear => 0,
            VoteDirection::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = RedditError;

    fn try_from(value: i64) -> RedditResult<Self> {
        match value {
            1 => Ok(VoteDirection::Up),
            0 => Ok(VoteDirection::Clear),
            -1 => Ok(VoteDirection::Down),
            _ => Err(RedditError::validation(format!(
                "vote direction must be 1, 0 or -1, got {value}"
            ))),
        }
    }
}

/// `created_utc` seconds to an RFC 3339 string, or null.
fn created(data: &Value) -> Value {
    data["created_utc"]
        .as_f64()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs as i64, 0))
        .map(|ts| Value::String(ts.to_rfc3339()))
        .unwrap_or(Value::Null)
}

fn preview(text: &Value) -> Value {
    match text.as_str() {
        Some(s) if s.chars().count() > SELFTEXT_PREVIEW_CHARS => {
            Value::String(s.chars().take(SELFTEXT_PREVIEW_CHARS).collect())
        }
        Some(s) => Value::String(s.to_string()),
        None => Value::Null,
    }
}

/// Compact view of one post's `data` object.
pub fn post_summary(data: &Value) -> Value {
    json!({
        "id": data["id"],
        "fullname": data["name"],
        "title": data["title"],
        "author": data["author"],
        "subreddit": data["subreddit"],
        "score": data["score"],
        "num_comments": data["num_comments"],
        "created": created(data),
        "url": data["url"],
        "permalink": data["permalink"],
        "is_self": data["is_self"],
        "selftext": preview(&data["selftext"]),
    })
}

/// Posts out of a `Listing` envelope, in listing order.
pub fn posts_from_listing(listing: &Value) -> Vec<Value> {
    listing["data"]["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .filter(|child| child["kind"] == "t3")
                .map(|child| post_summary(&child["data"]))
                .collect()
        })
        .unwrap_or_default()
}

fn comment_summary(data: &Value, depth: usize) -> Value {
    json!({
        "id": data["id"],
        "fullname": data["name"],
        "author": data["author"],
        "body": preview(&data["body"]),
        "score": data["score"],
        "created": created(data),
        "depth": depth,
    })
}

/// Flatten a comment `Listing` tree, depth-first, up to `limit` entries.
///
/// `more` stubs (unexpanded branches) are skipped, not resolved.
pub fn flatten_comments(listing: &Value, limit: usize) -> Vec<Value> {
    let mut out = Vec::new();
    collect_comments(listing, 0, limit, &mut out);
    out
}

fn collect_comments(listing: &Value, depth: usize, limit: usize, out: &mut Vec<Value>) {
    let Some(children) = listing["data"]["children"].as_array() else {
        return;
    };
    for child in children {
        if out.len() >= limit {
            return;
        }
        if child["kind"] != "t1" {
            continue;
        }
        let data = &child["data"];
        out.push(comment_summary(data, depth));
        // Leaf comments carry replies: "" rather than a nested listing.
        if data["replies"].is_object() {
            collect_comments(&data["replies"], depth + 1, limit, out);
        }
    }
}

/// Compact view of a `/user/{name}/about` response.
pub fn user_summary(about: &Value) -> Value {
    let data = &about["data"];
    json!({
        "name": data["name"],
        "fullname": data["id"].as_str().map(|id| format!("t2_{id}")),
        "created": created(data),
        "link_karma": data["link_karma"],
        "comment_karma": data["comment_karma"],
        "total_karma": data["total_karma"],
        "is_mod": data["is_mod"],
        "is_gold": data["is_gold"],
    })
}
