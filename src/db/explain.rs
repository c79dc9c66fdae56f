//! EXPLAIN result normalization.
//!
//! Each engine's driver hands back EXPLAIN output in a different shape:
//! PostgreSQL wraps an already-decoded plan in a single `"QUERY PLAN"`
//! column, MySQL returns one JSON-encoded string column (or, on older
//! servers, traditional tabular columns), SQLite and Snowflake return
//! multiple flat rows. This module flattens all of them into one list of
//! plain objects, one element per input row.

use serde_json::{Map, Value};

use super::dialect::DatabaseType;

/// Normalize raw EXPLAIN rows into a flat list of plan objects.
///
/// The output always has exactly as many elements as `rows`, and no
/// dialect wrapper key survives beyond what the engine naturally returns.
pub fn parse_explain_result(db: DatabaseType, rows: &[Map<String, Value>]) -> Vec<Value> {
    match db {
        DatabaseType::Postgresql => rows.iter().map(unwrap_single_column).collect(),
        DatabaseType::MySql => rows.iter().map(parse_mysql_row).collect(),
        DatabaseType::Sqlite | DatabaseType::Snowflake => {
            rows.iter().map(|row| Value::Object(row.clone())).collect()
        }
    }
}

/// PostgreSQL: one column (conventionally `"QUERY PLAN"`) whose value the
/// driver has already decoded from the JSON plan; strip the wrapper key.
fn unwrap_single_column(row: &Map<String, Value>) -> Value {
    let mut values = row.values();
    match (values.next(), values.next()) {
        (Some(value), None) => value.clone(),
        _ => Value::Object(row.clone()),
    }
}

/// MySQL: a single string column is JSON-decoded when possible. When the
/// decode fails, or the row is already flat tabular columns, the row passes
/// through unchanged. This fallback conflates pre-8.0 tabular EXPLAIN with
/// malformed JSON; the distinction is unverified against old servers.
fn parse_mysql_row(row: &Map<String, Value>) -> Value {
    let mut values = row.values();
    if let (Some(Value::String(text)), None) = (values.next(), values.next()) {
        if let Ok(decoded) = serde_json::from_str::<Value>(text) {
            return decoded;
        }
    }
    Value::Object(row.clone())
}
