//! Configuration error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}")]
    #[diagnostic(code(toolgate::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path:?}: {message}")]
    #[diagnostic(
        code(toolgate::config::parse),
        help("The file must be JSON. Re-create it with `init` if in doubt.")
    )]
    Parse { path: PathBuf, message: String },

    #[error("No config file at {path:?}")]
    #[diagnostic(
        code(toolgate::config::missing),
        help("Run `init [url]` first to create it.")
    )]
    Missing { path: PathBuf },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
