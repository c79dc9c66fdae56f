use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid connection URL: {message}")]
    #[diagnostic(
        code(toolgate::cli::invalid_url),
        help(
            "Supported forms: postgresql://, mysql://, sqlite: (or a .db/.sqlite path), \
             snowflake://<account>.snowflakecomputing.com/...?token=..."
        )
    )]
    InvalidUrl { message: String },
}

impl From<DbError> for CliError {
    fn from(e: DbError) -> Self {
        CliError::InvalidUrl {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
