//! Database error types.
//!
//! Every failure in the database layer is one of these variants; tool
//! handlers convert them into MCP error results, preserving the message.

use miette::Diagnostic;
use thiserror::Error;

/// Database adapter errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Unsupported database type for {what}: '{tag}'")]
    #[diagnostic(code(toolgate::db::unsupported))]
    Unsupported { what: &'static str, tag: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(toolgate::db::validation))]
    Validation { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(toolgate::db::connection))]
    Connection { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(toolgate::db::upstream))]
    Upstream { message: String },
}

impl DbError {
    pub fn validation(message: impl Into<String>) -> Self {
        DbError::Validation {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl ToString) -> Self {
        DbError::Upstream {
            message: message.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
