//! Snowflake SQL API client.
//!
//! Snowflake has no wire-protocol driver here; statements go over HTTPS to
//! `/api/v2/statements`. The DSN carries the account host, an optional
//! database path segment, and `token` / `warehouse` / `schema` query
//! parameters. Only token auth is supported: the SQL API does not accept
//! username/password credentials.

use serde_json::{Map, Value, json};
use url::Url;

use super::error::{DbError, DbResult};

const STATEMENT_TIMEOUT_SECS: u32 = 60;

#[derive(Debug)]
pub struct SnowflakeClient {
    http: reqwest::Client,
    statements_url: String,
    token: String,
    database: Option<String>,
    schema: Option<String>,
    warehouse: Option<String>,
}

impl SnowflakeClient {
    /// Build a client from a `snowflake://` DSN.
    ///
    /// Expected form:
    /// `snowflake://<account>.snowflakecomputing.com/<database>?token=...&warehouse=...&schema=...`
    pub fn from_dsn(dsn: &str) -> DbResult<Self> {
        let parsed = Url::parse(dsn).map_err(|e| {
            DbError::validation(format!("invalid snowflake connection string: {e}"))
        })?;
        let host = parsed
            .host_str()
            .ok_or_else(|| DbError::validation("snowflake connection string has no host"))?;
        if !host.ends_with("snowflakecomputing.com") {
            return Err(DbError::validation(
                "snowflake:// URL must point at a snowflakecomputing.com host",
            ));
        }

        let mut token = None;
        let mut schema = None;
        let mut warehouse = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "token" => token = Some(value.into_owned()),
                "schema" => schema = Some(value.into_owned()),
                "warehouse" => warehouse = Some(value.into_owned()),
                _ => {}
            }
        }
        let token = token.ok_or_else(|| {
            DbError::validation(
                "snowflake DSN must carry token=<programmatic access token>; \
                 username/password auth is not accepted by the SQL API",
            )
        })?;

        let database = parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);

        Ok(Self {
            http: reqwest::Client::new(),
            statements_url: format!("https://{host}/api/v2/statements"),
            token,
            database,
            schema,
            warehouse,
        })
    }

    /// Submit one statement and map the result set into JSON rows.
    pub async fn query(&self, sql: &str, binds: &[String]) -> DbResult<Vec<Map<String, Value>>> {
        let mut body = json!({
            "statement": sql,
            "timeout": STATEMENT_TIMEOUT_SECS,
        });
        if let Some(database) = &self.database {
            body["database"] = json!(database);
        }
        if let Some(schema) = &self.schema {
            body["schema"] = json!(schema);
        }
        if let Some(warehouse) = &self.warehouse {
            body["warehouse"] = json!(warehouse);
        }
        if !binds.is_empty() {
            let bindings: Map<String, Value> = binds
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    (
                        (i + 1).to_string(),
                        json!({"type": "TEXT", "value": value}),
                    )
                })
                .collect();
            body["bindings"] = Value::Object(bindings);
        }

        let response = self
            .http
            .post(&self.statements_url)
            .bearer_auth(&self.token)
            .header("X-Snowflake-Authorization-Token-Type", "OAUTH")
            .json(&body)
            .send()
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "no error detail".to_string());
            return Err(DbError::upstream(format!(
                "Snowflake API {status}: {detail}"
            )));
        }

        let payload: Value = response.json().await.map_err(DbError::upstream)?;
        rows_from_payload(&payload)
    }
}

/// Reshape the SQL API payload (`resultSetMetaData.rowType` names plus
/// `data` value arrays) into one JSON object per row.
pub(crate) fn rows_from_payload(payload: &Value) -> DbResult<Vec<Map<String, Value>>> {
    let names: Vec<&str> = payload["resultSetMetaData"]["rowType"]
        .as_array()
        .ok_or_else(|| DbError::upstream("Snowflake response is missing result metadata"))?
        .iter()
        .filter_map(|column| column["name"].as_str())
        .collect();
    let data = payload["data"]
        .as_array()
        .ok_or_else(|| DbError::upstream("Snowflake response is missing row data"))?;

    let mut rows = Vec::with_capacity(data.len());
    for entry in data {
        let values = entry
            .as_array()
            .ok_or_else(|| DbError::upstream("Snowflake row is not an array"))?;
        let mut row = Map::new();
        for (name, value) in names.iter().zip(values) {
            row.insert((*name).to_string(), value.clone());
        }
        rows.push(row);
    }
    Ok(rows)
}
