//! Owned database connection handles.
//!
//! A `DbHandle` is created once in `main` from the resolved connection URL
//! and injected into the server as an `Arc`; request handlers never reach
//! for process-wide state. The three sqlx engines share the pool-based
//! path; Snowflake goes through its HTTP SQL API client.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo};

use super::dialect::DatabaseType;
use super::error::{DbError, DbResult};
use super::snowflake::SnowflakeClient;

/// One open database, whichever engine it is.
pub enum DbHandle {
    Postgres(PgPool),
    MySql(MySqlPool),
    Sqlite(SqlitePool),
    Snowflake(SnowflakeClient),
}

impl DbHandle {
    /// Open a connection for the given URL, detecting the engine first.
    pub async fn connect(url: &str) -> DbResult<Self> {
        match DatabaseType::from_url(url)? {
            DatabaseType::Postgresql => {
                let pool = PgPool::connect(url).await.map_err(connection_error)?;
                Ok(DbHandle::Postgres(pool))
            }
            DatabaseType::MySql => {
                let pool = MySqlPool::connect(url).await.map_err(connection_error)?;
                Ok(DbHandle::MySql(pool))
            }
            DatabaseType::Sqlite => {
                let pool = SqlitePool::connect(&sqlite_url(url))
                    .await
                    .map_err(connection_error)?;
                Ok(DbHandle::Sqlite(pool))
            }
            DatabaseType::Snowflake => Ok(DbHandle::Snowflake(SnowflakeClient::from_dsn(url)?)),
        }
    }

    /// In-memory SQLite handle (useful for testing).
    ///
    /// Capped at one pooled connection: every pooled connection would
    /// otherwise open its own private in-memory database.
    pub async fn sqlite_in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(connection_error)?;
        Ok(DbHandle::Sqlite(pool))
    }

    pub fn database_type(&self) -> DatabaseType {
        match self {
            DbHandle::Postgres(_) => DatabaseType::Postgresql,
            DbHandle::MySql(_) => DatabaseType::MySql,
            DbHandle::Sqlite(_) => DatabaseType::Sqlite,
            DbHandle::Snowflake(_) => DatabaseType::Snowflake,
        }
    }

    /// Run `sql` with positional string binds and return rows as JSON maps.
    pub async fn query(&self, sql: &str, binds: &[String]) -> DbResult<Vec<Map<String, Value>>> {
        match self {
            DbHandle::Postgres(pool) => {
                let mut query = sqlx::query(sql);
                for bind in binds {
                    query = query.bind(bind.as_str());
                }
                let rows = query.fetch_all(pool).await.map_err(DbError::upstream)?;
                Ok(rows.iter().map(pg_row_to_json).collect())
            }
            DbHandle::MySql(pool) => {
                let mut query = sqlx::query(sql);
                for bind in binds {
                    query = query.bind(bind.as_str());
                }
                let rows = query.fetch_all(pool).await.map_err(DbError::upstream)?;
                Ok(rows.iter().map(mysql_row_to_json).collect())
            }
            DbHandle::Sqlite(pool) => {
                let mut query = sqlx::query(sql);
                for bind in binds {
                    query = query.bind(bind.as_str());
                }
                let rows = query.fetch_all(pool).await.map_err(DbError::upstream)?;
                Ok(rows.iter().map(sqlite_row_to_json).collect())
            }
            DbHandle::Snowflake(client) => client.query(sql, binds).await,
        }
    }

    /// Close the underlying pool. Idempotent; Snowflake holds no pool.
    pub async fn close(&self) {
        match self {
            DbHandle::Postgres(pool) => pool.close().await,
            DbHandle::MySql(pool) => pool.close().await,
            DbHandle::Sqlite(pool) => pool.close().await,
            DbHandle::Snowflake(_) => {}
        }
    }
}

fn connection_error(err: sqlx::Error) -> DbError {
    DbError::Connection {
        message: err.to_string(),
    }
}

/// sqlx wants a `sqlite:` scheme; bare `.db` paths are accepted upstream.
fn sqlite_url(url: &str) -> String {
    if url.starts_with("sqlite:") {
        url.to_string()
    } else {
        format!("sqlite:{url}")
    }
}

// Row decoding maps each engine's common column types onto JSON values.
// Types without a JSON-native mapping decode as text when the driver
// allows it; anything else surfaces as null rather than failing the row.

fn pg_row_to_json(row: &PgRow) -> Map<String, Value> {
    let mut out = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = match column.type_info().name() {
            "BOOL" => decode(row.try_get::<Option<bool>, _>(i)),
            "INT2" => decode(row.try_get::<Option<i16>, _>(i)),
            "INT4" => decode(row.try_get::<Option<i32>, _>(i)),
            "INT8" => decode(row.try_get::<Option<i64>, _>(i)),
            "FLOAT4" => decode(row.try_get::<Option<f32>, _>(i)),
            "FLOAT8" => decode(row.try_get::<Option<f64>, _>(i)),
            "JSON" | "JSONB" => decode(row.try_get::<Option<Value>, _>(i)),
            "BYTEA" => bytes_value(row.try_get::<Option<Vec<u8>>, _>(i)),
            "TIMESTAMPTZ" => text(row.try_get::<Option<DateTime<Utc>>, _>(i)),
            "TIMESTAMP" => text(row.try_get::<Option<NaiveDateTime>, _>(i)),
            "DATE" => text(row.try_get::<Option<NaiveDate>, _>(i)),
            "TIME" => text(row.try_get::<Option<NaiveTime>, _>(i)),
            _ => decode(row.try_get::<Option<String>, _>(i)),
        };
        out.insert(column.name().to_string(), value);
    }
    out
}

fn mysql_row_to_json(row: &MySqlRow) -> Map<String, Value> {
    let mut out = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let name = column.type_info().name();
        let value = if name.ends_with("UNSIGNED") {
            decode(row.try_get::<Option<u64>, _>(i))
        } else {
            match name {
                "BOOLEAN" => decode(row.try_get::<Option<bool>, _>(i)),
                "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
                    decode(row.try_get::<Option<i64>, _>(i))
                }
                "FLOAT" => decode(row.try_get::<Option<f32>, _>(i)),
                "DOUBLE" => decode(row.try_get::<Option<f64>, _>(i)),
                "JSON" => decode(row.try_get::<Option<Value>, _>(i)),
                "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => {
                    bytes_value(row.try_get::<Option<Vec<u8>>, _>(i))
                }
                "TIMESTAMP" => text(row.try_get::<Option<DateTime<Utc>>, _>(i)),
                "DATETIME" => text(row.try_get::<Option<NaiveDateTime>, _>(i)),
                "DATE" => text(row.try_get::<Option<NaiveDate>, _>(i)),
                "TIME" => text(row.try_get::<Option<NaiveTime>, _>(i)),
                _ => decode(row.try_get::<Option<String>, _>(i)),
            }
        };
        out.insert(column.name().to_string(), value);
    }
    out
}

fn sqlite_row_to_json(row: &SqliteRow) -> Map<String, Value> {
    let mut out = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = match column.type_info().name() {
            "BOOLEAN" => decode(row.try_get::<Option<bool>, _>(i)),
            "INTEGER" => decode(row.try_get::<Option<i64>, _>(i)),
            "REAL" | "NUMERIC" => decode(row.try_get::<Option<f64>, _>(i)),
            "BLOB" => bytes_value(row.try_get::<Option<Vec<u8>>, _>(i)),
            "DATETIME" => text(row.try_get::<Option<NaiveDateTime>, _>(i)),
            "DATE" => text(row.try_get::<Option<NaiveDate>, _>(i)),
            "TIME" => text(row.try_get::<Option<NaiveTime>, _>(i)),
            "NULL" => Value::Null,
            _ => decode(row.try_get::<Option<String>, _>(i)),
        };
        out.insert(column.name().to_string(), value);
    }
    out
}

fn decode<T: Into<Value>>(result: Result<Option<T>, sqlx::Error>) -> Value {
    match result {
        Ok(Some(value)) => value.into(),
        Ok(None) => Value::Null,
        Err(err) => {
            tracing::debug!("column decode failed, returning null: {err}");
            Value::Null
        }
    }
}

fn text<T: ToString>(result: Result<Option<T>, sqlx::Error>) -> Value {
    match result {
        Ok(Some(value)) => Value::String(value.to_string()),
        Ok(None) => Value::Null,
        Err(err) => {
            tracing::debug!("column decode failed, returning null: {err}");
            Value::Null
        }
    }
}

fn bytes_value(result: Result<Option<Vec<u8>>, sqlx::Error>) -> Value {
    match result {
        Ok(Some(bytes)) => Value::String(BASE64.encode(bytes)),
        Ok(None) => Value::Null,
        Err(err) => {
            tracing::debug!("column decode failed, returning null: {err}");
            Value::Null
        }
    }
}
