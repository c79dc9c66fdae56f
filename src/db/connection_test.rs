//! Tests for connection handles and row decoding, against in-memory SQLite.

use crate::db::{DatabaseType, DbHandle};

#[tokio::test(flavor = "multi_thread")]
async fn test_sqlite_in_memory_reports_its_type() {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    assert_eq!(handle.database_type(), DatabaseType::Sqlite);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scalar_values_decode_to_json() {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    let rows = handle
        .query("SELECT 1 AS n, 'x' AS s, 2.5 AS r, NULL AS z", &[])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["n"], 1);
    assert_eq!(rows[0]["s"], "x");
    assert_eq!(rows[0]["r"], 2.5);
    assert!(rows[0]["z"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blob_values_decode_to_base64() {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    let rows = handle.query("SELECT X'0102' AS b", &[]).await.unwrap();
    assert_eq!(rows[0]["b"], "AQI=");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tables_persist_across_queries() {
    // The in-memory pool is capped at one connection; a second pooled
    // connection would see an empty database.
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    handle
        .query("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)", &[])
        .await
        .unwrap();
    handle
        .query("INSERT INTO t (v) VALUES ('a'), ('b')", &[])
        .await
        .unwrap();
    let rows = handle.query("SELECT v FROM t ORDER BY id", &[]).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["v"], "a");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binds_are_applied_in_order() {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    let rows = handle
        .query(
            "SELECT ? AS first, ? AS second",
            &["one".to_string(), "two".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(rows[0]["first"], "one");
    assert_eq!(rows[0]["second"], "two");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_error_surfaces_driver_message() {
    let handle = DbHandle::sqlite_in_memory().await.unwrap();
    let err = handle.query("SELECT * FROM missing", &[]).await.unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_rejects_unrecognized_urls() {
    assert!(DbHandle::connect("mongodb://localhost/db").await.is_err());
}
