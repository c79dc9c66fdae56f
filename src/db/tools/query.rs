//! MCP tools for ad-hoc queries and connection inspection.

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

use crate::db::guard::ensure_read_only;
use crate::db::server::DbServer;
use crate::mcp::{error_result, text_result};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunQueryParams {
    #[schemars(
        description = "Single read-only SQL statement to execute. Multiple statements and write statements are rejected."
    )]
    pub sql: String,
}

#[tool_router(router = query_router, vis = "pub(crate)")]
impl DbServer {
    #[tool(
        description = "Execute a single read-only SQL query against the connected database and return the rows as JSON. INSERT/UPDATE/DELETE/DDL statements are rejected."
    )]
    pub async fn run_query(
        &self,
        params: Parameters<RunQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = ensure_read_only(&params.0.sql) {
            return Ok(error_result(err));
        }

        match self.handle.query(&params.0.sql, &[]).await {
            Ok(rows) => Ok(text_result(&json!({
                "row_count": rows.len(),
                "rows": rows,
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Describe the active connection: database type and the redacted connection URL."
    )]
    pub async fn connection_info(&self) -> Result<CallToolResult, McpError> {
        Ok(text_result(&json!({
            "database_type": self.handle.database_type().as_str(),
            "url": self.redacted_url,
        })))
    }
}
