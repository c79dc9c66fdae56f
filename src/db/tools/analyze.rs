//! MCP tools for query plans and column analysis.
//!
//! These are the two handlers that drive the query builder and the EXPLAIN
//! normalizer; the builder functions themselves are not exposed as tools.

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

use crate::db::explain::parse_explain_result;
use crate::db::query::{
    build_column_stats_query, build_explain_query, build_most_common_values_query,
};
use crate::db::server::DbServer;
use crate::mcp::{error_result, text_result};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExplainQueryParams {
    #[schemars(description = "SQL query to explain (it is not executed unless analyze is set)")]
    pub query: String,
    #[schemars(
        description = "Execute the query while planning, where the engine supports it (PostgreSQL, MySQL). Ignored for SQLite and Snowflake."
    )]
    pub analyze: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeColumnParams {
    #[schemars(description = "Table the column lives in (unquoted)")]
    pub table: String,
    #[schemars(description = "Column to analyze (unquoted)")]
    pub column: String,
    #[schemars(description = "How many of the most common values to return (default: 10)")]
    pub limit: Option<u32>,
}

#[tool_router(router = analyze_router, vis = "pub(crate)")]
impl DbServer {
    #[tool(
        description = "Run EXPLAIN for a query and return the execution plan, normalized to a flat list of plan nodes regardless of engine."
    )]
    pub async fn explain_query(
        &self,
        params: Parameters<ExplainQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.handle.database_type();
        let sql = build_explain_query(db, &params.0.query, params.0.analyze.unwrap_or(false));

        match self.handle.query(&sql, &[]).await {
            Ok(rows) => {
                let plan = parse_explain_result(db, &rows);
                Ok(text_result(&json!({
                    "database_type": db.as_str(),
                    "explain": plan,
                })))
            }
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Analyze a column: total, non-null and distinct counts, plus its most common values with frequencies."
    )]
    pub async fn analyze_column(
        &self,
        params: Parameters<AnalyzeColumnParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.handle.database_type();
        let table = &params.0.table;
        let column = &params.0.column;

        let stats_sql = build_column_stats_query(db, table, column);
        let stats = match self.handle.query(&stats_sql, &[]).await {
            Ok(rows) => rows.into_iter().next(),
            Err(err) => return Ok(error_result(err)),
        };

        let common_sql =
            build_most_common_values_query(db, table, column, params.0.limit);
        let most_common = match self.handle.query(&common_sql, &[]).await {
            Ok(rows) => rows,
            Err(err) => return Ok(error_result(err)),
        };

        Ok(text_result(&json!({
            "table": table,
            "column": column,
            "statistics": stats,
            "most_common_values": most_common,
        })))
    }
}
