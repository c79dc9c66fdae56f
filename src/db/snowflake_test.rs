//! Tests for the Snowflake SQL API client.

use serde_json::json;

use crate::db::snowflake::{SnowflakeClient, rows_from_payload};

#[test]
fn test_from_dsn_full_form() {
    let client = SnowflakeClient::from_dsn(
        "snowflake://org-acct.snowflakecomputing.com/ANALYTICS?token=pat123&warehouse=WH&schema=PUBLIC",
    );
    assert!(client.is_ok());
}

#[test]
fn test_from_dsn_requires_token() {
    let err =
        SnowflakeClient::from_dsn("snowflake://org-acct.snowflakecomputing.com/ANALYTICS")
            .unwrap_err();
    assert!(err.to_string().contains("token"));
}

#[test]
fn test_from_dsn_rejects_non_snowflake_host() {
    let err = SnowflakeClient::from_dsn("snowflake://evil.example.com/?token=x").unwrap_err();
    assert!(err.to_string().contains("snowflakecomputing.com"));
}

#[test]
fn test_from_dsn_rejects_garbage() {
    assert!(SnowflakeClient::from_dsn("not a url at all").is_err());
}

#[test]
fn test_rows_from_payload_zips_names_and_values() {
    let payload = json!({
        "resultSetMetaData": {
            "rowType": [{"name": "STEP"}, {"name": "OPERATION"}]
        },
        "data": [["1", "TableScan"], ["2", "Filter"]]
    });
    let rows = rows_from_payload(&payload).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["STEP"], "1");
    assert_eq!(rows[1]["OPERATION"], "Filter");
}

#[test]
fn test_rows_from_payload_preserves_nulls() {
    let payload = json!({
        "resultSetMetaData": {"rowType": [{"name": "V"}]},
        "data": [[null]]
    });
    let rows = rows_from_payload(&payload).unwrap();
    assert!(rows[0]["V"].is_null());
}

#[test]
fn test_rows_from_payload_missing_metadata_is_an_error() {
    let err = rows_from_payload(&json!({"data": []})).unwrap_err();
    assert!(err.to_string().contains("metadata"));
}
