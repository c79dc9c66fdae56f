//! Database type detection and dialect descriptors.
//!
//! `DatabaseType` is a closed enumeration: every supported engine is a
//! variant, and dispatch is an exhaustive `match` everywhere. Unknown engine
//! tags are rejected once, where raw strings enter the system, so the query
//! builder itself is total over the enum.

use serde::{Deserialize, Serialize};

use super::error::{DbError, DbResult};

/// Supported database engines. Selected once per connection string at
/// startup and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgresql,
    MySql,
    Sqlite,
    Snowflake,
}

/// Placeholder style a driver expects for bound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Numbered positional placeholders: `$1`, `$2`, ...
    Numbered,
    /// Anonymous placeholders bound in order: `?`
    Anonymous,
}

/// Read-only syntax descriptor for one engine.
///
/// Constructed at compile time, never mutated. Templates use `{sql}` and
/// `{expr}` as substitution points.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    /// Identifier quote character; embedded occurrences are doubled.
    pub identifier_quote: char,
    /// Placeholder style for bound parameters.
    pub placeholder: Placeholder,
    /// EXPLAIN template.
    pub explain_format: &'static str,
    /// EXPLAIN-with-ANALYZE template; `None` means the analyze flag is a
    /// no-op for this engine.
    pub explain_analyze_format: Option<&'static str>,
    /// Cast-to-text template for aggregate output, so results serialize
    /// cleanly to JSON; `None` means no cast is needed.
    pub text_cast: Option<&'static str>,
    /// Column holding the table name in this engine's catalog.
    pub catalog_name_column: &'static str,
}

const POSTGRESQL: Dialect = Dialect {
    identifier_quote: '"',
    placeholder: Placeholder::Numbered,
    explain_format: "EXPLAIN (FORMAT JSON) {sql}",
    explain_analyze_format: Some("EXPLAIN (ANALYZE, FORMAT JSON) {sql}"),
    text_cast: Some("{expr}::text"),
    catalog_name_column: "table_name",
};

// MySQL's ANALYZE form drops FORMAT=JSON; the server rejects the combination.
const MYSQL: Dialect = Dialect {
    identifier_quote: '`',
    placeholder: Placeholder::Anonymous,
    explain_format: "EXPLAIN FORMAT=JSON {sql}",
    explain_analyze_format: Some("EXPLAIN ANALYZE {sql}"),
    text_cast: Some("CAST({expr} AS CHAR)"),
    catalog_name_column: "table_name",
};

const SQLITE: Dialect = Dialect {
    identifier_quote: '"',
    placeholder: Placeholder::Anonymous,
    explain_format: "EXPLAIN QUERY PLAN {sql}",
    explain_analyze_format: None,
    text_cast: None,
    catalog_name_column: "name",
};

const SNOWFLAKE: Dialect = Dialect {
    identifier_quote: '"',
    placeholder: Placeholder::Anonymous,
    explain_format: "EXPLAIN {sql}",
    explain_analyze_format: None,
    text_cast: Some("TO_VARCHAR({expr})"),
    catalog_name_column: "table_name",
};

impl DatabaseType {
    /// Detect the engine from a connection string.
    ///
    /// Recognized forms:
    /// - `postgresql://` / `postgres://`
    /// - `mysql://`
    /// - `sqlite:` prefix, or a bare path ending in `.db` / `.sqlite` /
    ///   `.sqlite3`
    /// - `snowflake://` pointing at a `snowflakecomputing.com` host
    ///
    /// Anything else fails before a dialect is ever selected.
    pub fn from_url(url: &str) -> DbResult<Self> {
        if url.starts_with("postgresql://") || url.starts_with("postgres://") {
            return Ok(DatabaseType::Postgresql);
        }
        if url.starts_with("mysql://") {
            return Ok(DatabaseType::MySql);
        }
        if url.starts_with("sqlite:")
            || url.ends_with(".db")
            || url.ends_with(".sqlite")
            || url.ends_with(".sqlite3")
        {
            return Ok(DatabaseType::Sqlite);
        }
        if url.starts_with("snowflake://") {
            if url.contains("snowflakecomputing.com") {
                return Ok(DatabaseType::Snowflake);
            }
            return Err(DbError::validation(
                "snowflake:// URL must point at a snowflakecomputing.com host",
            ));
        }
        Err(DbError::validation(format!(
            "unrecognized connection string: '{}'",
            crate::config::redact_url(url)
        )))
    }

    /// Parse a raw engine tag, rejecting anything outside the closed set.
    ///
    /// `what` names the operation on whose behalf the tag is being parsed,
    /// so the error reads "Unsupported database type for EXPLAIN: 'mongodb'".
    pub fn parse_tag(tag: &str, what: &'static str) -> DbResult<Self> {
        match tag {
            "postgresql" | "postgres" => Ok(DatabaseType::Postgresql),
            "mysql" => Ok(DatabaseType::MySql),
            "sqlite" => Ok(DatabaseType::Sqlite),
            "snowflake" => Ok(DatabaseType::Snowflake),
            _ => Err(DbError::Unsupported {
                what,
                tag: tag.to_string(),
            }),
        }
    }

    /// The dialect descriptor for this engine.
    pub fn dialect(self) -> &'static Dialect {
        match self {
            DatabaseType::Postgresql => &POSTGRESQL,
            DatabaseType::MySql => &MYSQL,
            DatabaseType::Sqlite => &SQLITE,
            DatabaseType::Snowflake => &SNOWFLAKE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::MySql => "mysql",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::Snowflake => "snowflake",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
