//! Reddit MCP server.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use super::client::RedditClient;

/// MCP server exposing the Reddit API as tools.
///
/// Tool routers are split per concern (browse / search / users / publish)
/// and combined here. Read tools work anonymously; publish tools require
/// configured credentials.
#[derive(Clone)]
pub struct RedditServer {
    pub(crate) client: Arc<RedditClient>,
    tool_router: ToolRouter<Self>,
}

impl RedditServer {
    pub fn new(client: Arc<RedditClient>) -> Self {
        Self {
            client,
            tool_router: Self::browse_router()
                + Self::search_router()
                + Self::user_router()
                + Self::publish_router(),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RedditServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Toolgate Reddit server - browse subreddits, read comment threads, search, \
                 inspect users, and (with credentials) submit, comment, edit, delete and vote",
        )
    }
}
