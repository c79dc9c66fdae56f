//! Database MCP server.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use super::connection::DbHandle;

/// MCP server exposing one database connection as tools.
///
/// The handle is injected at construction and shared read-only across
/// sessions; tool routers are split per concern (query / schema / analyze)
/// and combined here.
#[derive(Clone)]
pub struct DbServer {
    pub(crate) handle: Arc<DbHandle>,
    pub(crate) redacted_url: String,
    tool_router: ToolRouter<Self>,
}

impl DbServer {
    /// Create a new server over an open database handle.
    ///
    /// `redacted_url` is the connection string with credentials stripped,
    /// for display in `connection_info` and logs.
    pub fn new(handle: Arc<DbHandle>, redacted_url: String) -> Self {
        Self {
            handle,
            redacted_url,
            tool_router: Self::query_router() + Self::schema_router() + Self::analyze_router(),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Toolgate database server - run read-only SQL, inspect schemas, and analyze \
                 query plans and column distributions",
        )
    }
}
