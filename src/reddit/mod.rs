//! Reddit adapter.
//!
//! A thin translation layer: MCP tool calls in, Reddit REST calls out,
//! listings reshaped into compact JSON on the way back.
//!
//! - `auth`: OAuth token fetch and caching
//! - `client`: HTTP client with the single retry-after-429 policy
//! - `model`: fullnames, vote directions, listing reshaping
//! - `server` / `tools`: the MCP surface

mod auth;
mod client;
mod error;
pub mod model;
mod server;
pub mod tools;

#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod client_test;

pub use auth::{Credentials, TokenManager};
pub use client::RedditClient;
pub use error::{RedditError, RedditResult};
pub use server::RedditServer;
