//! Read-only statement guard for the query tool.
//!
//! A bounded keyword check, not a SQL parser: the statement's leading
//! keyword must be on the read allowlist, and the input must contain a
//! single statement. Engines disagree on edge cases a parser would catch;
//! the guard errs on the side of rejection.

use super::error::{DbError, DbResult};

const READ_KEYWORDS: &[&str] = &[
    "SELECT", "WITH", "SHOW", "EXPLAIN", "DESCRIBE", "DESC", "PRAGMA", "VALUES",
];

/// Reject `sql` unless it is a single read-only statement.
pub fn ensure_read_only(sql: &str) -> DbResult<()> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(DbError::validation("empty SQL statement"));
    }

    // One trailing semicolon is fine; anything after it is a second statement.
    let mut statements = trimmed
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let first = statements
        .next()
        .ok_or_else(|| DbError::validation("empty SQL statement"))?;
    if statements.next().is_some() {
        return Err(DbError::validation(
            "multiple statements are not allowed; submit one statement per call",
        ));
    }

    let keyword: String = first
        .chars()
        .take_while(|ch| ch.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    if keyword.is_empty() {
        return Err(DbError::validation(
            "statement must begin with a SQL keyword",
        ));
    }
    if !READ_KEYWORDS.contains(&keyword.as_str()) {
        return Err(DbError::validation(format!(
            "statement '{keyword}' is not allowed; this tool only runs read-only queries"
        )));
    }
    Ok(())
}
