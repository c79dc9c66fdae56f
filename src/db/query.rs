//! Dialect-correct SQL string construction.
//!
//! Pure functions from `(DatabaseType, inputs)` to SQL text. Nothing here
//! talks to a database; the generated strings are handed straight to a
//! driver and never inspected again.

use super::dialect::{DatabaseType, Placeholder};

/// Default LIMIT for [`build_most_common_values_query`].
pub const DEFAULT_COMMON_VALUES_LIMIT: u32 = 10;

/// Wrap `query` in the engine's EXPLAIN syntax.
///
/// The `analyze` flag is honored only where the engine has an
/// ANALYZE-in-EXPLAIN form; SQLite and Snowflake accept it silently.
pub fn build_explain_query(db: DatabaseType, query: &str, analyze: bool) -> String {
    let dialect = db.dialect();
    let template = if analyze {
        dialect.explain_analyze_format.unwrap_or(dialect.explain_format)
    } else {
        dialect.explain_format
    };
    template.replace("{sql}", query)
}

/// Quote `identifier` for the engine, doubling any embedded occurrence of
/// the quote character (standard SQL identifier escaping).
pub fn escape_identifier(db: DatabaseType, identifier: &str) -> String {
    let quote = db.dialect().identifier_quote;
    let mut out = String::with_capacity(identifier.len() + 2);
    out.push(quote);
    for ch in identifier.chars() {
        out.push(ch);
        if ch == quote {
            out.push(quote);
        }
    }
    out.push(quote);
    out
}

fn cast_text(db: DatabaseType, expr: &str) -> String {
    match db.dialect().text_cast {
        Some(template) => template.replace("{expr}", expr),
        None => expr.to_string(),
    }
}

/// Single-row aggregate query returning total, non-null and distinct counts
/// for `column`, with each aggregate cast so the counts serialize as text
/// where the engine would otherwise hand back driver-specific numerics.
pub fn build_column_stats_query(db: DatabaseType, table: &str, column: &str) -> String {
    let table = escape_identifier(db, table);
    let column = escape_identifier(db, column);
    format!(
        "SELECT {total} AS total_count, {non_null} AS non_null_count, {distinct} AS distinct_count FROM {table}",
        total = cast_text(db, "COUNT(*)"),
        non_null = cast_text(db, &format!("COUNT({column})")),
        distinct = cast_text(db, &format!("COUNT(DISTINCT {column})")),
    )
}

/// Frequency table for `column`: the most common values, descending.
///
/// A `limit` of `None` or zero falls back to [`DEFAULT_COMMON_VALUES_LIMIT`].
pub fn build_most_common_values_query(
    db: DatabaseType,
    table: &str,
    column: &str,
    limit: Option<u32>,
) -> String {
    let limit = match limit {
        Some(n) if n > 0 => n,
        _ => DEFAULT_COMMON_VALUES_LIMIT,
    };
    let table = escape_identifier(db, table);
    let column = escape_identifier(db, column);
    format!(
        "SELECT {column}, COUNT(*) AS frequency FROM {table} GROUP BY {column} ORDER BY frequency DESC LIMIT {limit}"
    )
}

/// WHERE-clause fragment filtering a catalog query by table name.
///
/// PostgreSQL gets a numbered placeholder carrying `param_index`; MySQL and
/// Snowflake bind positionally, so the index is ignored; SQLite's catalog
/// stores the table name in a column called `name` rather than `table_name`.
pub fn build_table_filter(db: DatabaseType, param_index: usize) -> String {
    let dialect = db.dialect();
    match dialect.placeholder {
        Placeholder::Numbered => format!("{} = ${param_index}", dialect.catalog_name_column),
        Placeholder::Anonymous => format!("{} = ?", dialect.catalog_name_column),
    }
}
