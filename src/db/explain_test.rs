//! Tests for EXPLAIN result normalization.

use serde_json::{Map, Value, json};

use crate::db::DatabaseType::{MySql, Postgresql, Snowflake, Sqlite};
use crate::db::explain::parse_explain_result;

fn row(value: Value) -> Map<String, Value> {
    value.as_object().expect("fixture must be an object").clone()
}

#[test]
fn test_postgresql_strips_the_wrapper_key() {
    let rows = vec![row(json!({"QUERY PLAN": {"a": 1}}))];
    let parsed = parse_explain_result(Postgresql, &rows);
    assert_eq!(parsed, vec![json!({"a": 1})]);
}

#[test]
fn test_postgresql_wrapper_key_name_does_not_matter() {
    let rows = vec![row(json!({"plan": [{"Plan": {"Node Type": "Seq Scan"}}]}))];
    let parsed = parse_explain_result(Postgresql, &rows);
    assert_eq!(parsed, vec![json!([{"Plan": {"Node Type": "Seq Scan"}}])]);
}

#[test]
fn test_mysql_decodes_json_string_column() {
    let rows = vec![row(json!({"EXPLAIN": "{\"x\":1}"}))];
    let parsed = parse_explain_result(MySql, &rows);
    assert_eq!(parsed, vec![json!({"x": 1})]);
}

#[test]
fn test_mysql_flat_row_passes_through_unchanged() {
    let rows = vec![row(json!({"id": 1, "table": "t"}))];
    let parsed = parse_explain_result(MySql, &rows);
    assert_eq!(parsed, vec![json!({"id": 1, "table": "t"})]);
}

#[test]
fn test_mysql_unparseable_string_passes_through_unchanged() {
    let rows = vec![row(json!({"EXPLAIN": "not json at all"}))];
    let parsed = parse_explain_result(MySql, &rows);
    assert_eq!(parsed, vec![json!({"EXPLAIN": "not json at all"})]);
}

#[test]
fn test_sqlite_rows_pass_through() {
    let rows = vec![
        row(json!({"id": 2, "parent": 0, "notused": 0, "detail": "SCAN users"})),
        row(json!({"id": 4, "parent": 2, "notused": 0, "detail": "USE INDEX"})),
    ];
    let parsed = parse_explain_result(Sqlite, &rows);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["detail"], "SCAN users");
    assert_eq!(parsed[1]["id"], 4);
}

#[test]
fn test_snowflake_rows_pass_through() {
    let rows = vec![row(
        json!({"step": 1, "operation": "TableScan", "object": "USERS"}),
    )];
    let parsed = parse_explain_result(Snowflake, &rows);
    assert_eq!(parsed, vec![json!({"step": 1, "operation": "TableScan", "object": "USERS"})]);
}

#[test]
fn test_output_length_always_matches_input_length() {
    let rows: Vec<Map<String, Value>> = (0..5)
        .map(|i| row(json!({"EXPLAIN": format!("{{\"step\":{i}}}")})))
        .collect();
    for db in [Postgresql, MySql, Sqlite, Snowflake] {
        assert_eq!(parse_explain_result(db, &rows).len(), rows.len());
    }
    for db in [Postgresql, MySql, Sqlite, Snowflake] {
        assert!(parse_explain_result(db, &[]).is_empty());
    }
}
