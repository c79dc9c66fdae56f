//! MCP tools for schema inspection.
//!
//! Catalog queries are per-dialect; table-name filters go through
//! `build_table_filter` and are bound as parameters, never spliced into
//! the SQL text.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::DatabaseType;
use crate::db::query::build_table_filter;
use crate::db::server::DbServer;
use crate::mcp::{error_result, text_result};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    #[schemars(description = "Table name to describe (unquoted)")]
    pub table: String,
}

#[tool_router(router = schema_router, vis = "pub(crate)")]
impl DbServer {
    #[tool(description = "List the tables in the connected database.")]
    pub async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        let db = self.handle.database_type();
        let sql = match db {
            DatabaseType::Postgresql => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'public' ORDER BY table_name"
            }
            DatabaseType::MySql => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = DATABASE() ORDER BY table_name"
            }
            DatabaseType::Sqlite => {
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
            }
            DatabaseType::Snowflake => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = CURRENT_SCHEMA() ORDER BY table_name"
            }
        };

        match self.handle.query(sql, &[]).await {
            Ok(rows) => {
                let tables: Vec<&Value> = rows.iter().filter_map(|row| row.values().next()).collect();
                Ok(text_result(&json!({
                    "database_type": db.as_str(),
                    "tables": tables,
                })))
            }
            Err(err) => Ok(error_result(err)),
        }
    }

    #[tool(
        description = "Describe a table's columns: name, data type, nullability and default value."
    )]
    pub async fn describe_table(
        &self,
        params: Parameters<DescribeTableParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.handle.database_type();
        let table = params.0.table;

        if db == DatabaseType::Sqlite {
            return self.describe_sqlite_table(&table).await;
        }

        let schema_scope = match db {
            DatabaseType::Postgresql => "table_schema = 'public'",
            DatabaseType::MySql => "table_schema = DATABASE()",
            DatabaseType::Snowflake => "table_schema = CURRENT_SCHEMA()",
            DatabaseType::Sqlite => unreachable!("handled above"),
        };
        let sql = format!(
            "SELECT column_name, data_type, is_nullable, column_default \
             FROM information_schema.columns WHERE {schema_scope} AND {filter} \
             ORDER BY ordinal_position",
            filter = build_table_filter(db, 1),
        );

        match self.handle.query(&sql, std::slice::from_ref(&table)).await {
            Ok(columns) => Ok(text_result(&json!({
                "table": table,
                "columns": columns,
            }))),
            Err(err) => Ok(error_result(err)),
        }
    }
}

impl DbServer {
    /// SQLite keeps column metadata in `pragma_table_info` and the original
    /// DDL in `sqlite_master`; report both.
    async fn describe_sqlite_table(&self, table: &str) -> Result<CallToolResult, McpError> {
        let params = [table.to_string()];
        let columns = match self
            .handle
            .query(
                "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?)",
                &params,
            )
            .await
        {
            Ok(columns) => columns,
            Err(err) => return Ok(error_result(err)),
        };

        let ddl_sql = format!(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND {}",
            build_table_filter(DatabaseType::Sqlite, 1),
        );
        let ddl = match self.handle.query(&ddl_sql, &params).await {
            Ok(rows) => rows
                .into_iter()
                .next()
                .and_then(|row| row.get("sql").cloned())
                .unwrap_or(Value::Null),
            Err(err) => return Ok(error_result(err)),
        };

        Ok(text_result(&json!({
            "table": table,
            "columns": columns,
            "ddl": ddl,
        })))
    }
}
