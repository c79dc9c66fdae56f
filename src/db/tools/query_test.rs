//! Tests for the query tools, end-to-end against in-memory SQLite.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;

use crate::db::tools::query::RunQueryParams;
use crate::db::{DbHandle, DbServer};

async fn test_server() -> DbServer {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    handle
        .query(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, status TEXT)",
            &[],
        )
        .await
        .unwrap();
    handle
        .query(
            "INSERT INTO users (name, status) VALUES \
             ('ada', 'active'), ('ben', 'active'), ('cay', 'banned')",
            &[],
        )
        .await
        .unwrap();
    DbServer::new(Arc::new(handle), "sqlite::memory:".to_string())
}

fn content_json(result: &rmcp::model::CallToolResult) -> serde_json::Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_query_returns_rows() {
    let server = test_server().await;
    let result = server
        .run_query(Parameters(RunQueryParams {
            sql: "SELECT name FROM users WHERE status = 'active' ORDER BY name".to_string(),
        }))
        .await
        .expect("run_query should succeed");

    assert_ne!(result.is_error, Some(true));
    let json = content_json(&result);
    assert_eq!(json["row_count"], 2);
    assert_eq!(json["rows"][0]["name"], "ada");
    assert_eq!(json["rows"][1]["name"], "ben");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_query_rejects_write_statements() {
    let server = test_server().await;
    let result = server
        .run_query(Parameters(RunQueryParams {
            sql: "DROP TABLE users".to_string(),
        }))
        .await
        .expect("handler itself should not fail");

    assert_eq!(result.is_error, Some(true));

    // The table must still exist afterwards.
    let rows = server.handle.query("SELECT COUNT(*) AS c FROM users", &[]).await.unwrap();
    assert_eq!(rows[0]["c"], 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_query_error_preserves_driver_message() {
    let server = test_server().await;
    let result = server
        .run_query(Parameters(RunQueryParams {
            sql: "SELECT * FROM no_such_table".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("expected text content"),
    };
    assert!(text.contains("no_such_table"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_info_reports_type_and_url() {
    let server = test_server().await;
    let result = server.connection_info().await.unwrap();
    let json = content_json(&result);
    assert_eq!(json["database_type"], "sqlite");
    assert_eq!(json["url"], "sqlite::memory:");
}
