//! Command-line surface for both binaries.
//!
//! Subcommands and config-management flags are handled here and report
//! back a "handled" flag: `Ok(true)` means the process is done, `Ok(false)`
//! means fall through and serve MCP. Exiting is the binary's decision, not
//! this module's.

pub mod error;


use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::config::{Settings, config_file, redact_url};
use crate::db::DatabaseType;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "toolgate-db")]
#[command(author, version, about = "Database MCP server", long_about = None)]
pub struct DbCli {
    /// Database connection URL (overrides config file and environment)
    #[arg(long)]
    pub db_url: Option<String>,

    /// Serve the Streamable HTTP transport on this address instead of stdio
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Print the resolved config file path and exit
    #[arg(long)]
    pub find_config: bool,

    /// Deprecated alias for `init`
    #[arg(long, hide = true)]
    pub configure: bool,

    /// Deprecated alias for `init`
    #[arg(long, hide = true)]
    pub setup: bool,

    #[command(subcommand)]
    pub command: Option<DbCommand>,
}

#[derive(Subcommand)]
pub enum DbCommand {
    /// Create or refresh the config file, optionally storing a connection URL
    Init {
        /// Connection URL to store
        url: Option<String>,
    },
    /// Show the config location and the configured connection
    Status,
    /// Replace the stored connection URL (config file must exist)
    Update {
        /// New connection URL
        url: String,
    },
}

#[derive(Parser)]
#[command(name = "toolgate-reddit")]
#[command(author, version, about = "Reddit MCP server", long_about = None)]
pub struct RedditCli {
    /// Serve the Streamable HTTP transport on this address instead of stdio
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Print the resolved config file path and exit
    #[arg(long)]
    pub find_config: bool,

    #[command(subcommand)]
    pub command: Option<RedditCommand>,
}

#[derive(Subcommand)]
pub enum RedditCommand {
    /// Show the config location and which credentials are configured
    Status,
}

/// Handle the db binary's management surface.
///
/// Returns `Ok(true)` when a command or flag was handled and the process
/// should exit, `Ok(false)` when the binary should go on to serve MCP.
pub fn handle_db(cli: &DbCli) -> CliResult<bool> {
    if cli.find_config {
        println!("{}", config_file().display());
        return Ok(true);
    }
    if cli.configure || cli.setup {
        let flag = if cli.configure { "--configure" } else { "--setup" };
        eprintln!("{flag} is deprecated; use `toolgate-db init [url]` instead");
        init(cli.db_url.clone())?;
        return Ok(true);
    }
    match &cli.command {
        Some(DbCommand::Init { url }) => {
            init(url.clone())?;
            Ok(true)
        }
        Some(DbCommand::Status) => {
            db_status(cli.db_url.as_deref())?;
            Ok(true)
        }
        Some(DbCommand::Update { url }) => {
            update(url)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Handle the reddit binary's management surface. Same contract as
/// [`handle_db`].
pub fn handle_reddit(cli: &RedditCli) -> CliResult<bool> {
    if cli.find_config {
        println!("{}", config_file().display());
        return Ok(true);
    }
    match &cli.command {
        Some(RedditCommand::Status) => {
            reddit_status()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn validate_url(url: &str) -> CliResult<()> {
    DatabaseType::from_url(url)?;
    Ok(())
}

fn init(url: Option<String>) -> CliResult<()> {
    let path = config_file();
    // Keep whatever is already configured; init only adds.
    let mut settings = Settings::from_file(&path)?;
    if let Some(url) = url {
        validate_url(&url)?;
        settings.database.url = Some(url);
    }
    settings.save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn update(url: &str) -> CliResult<()> {
    let path = config_file();
    if !path.exists() {
        return Err(CliError::Config(crate::config::ConfigError::Missing { path }));
    }
    validate_url(url)?;
    let mut settings = Settings::from_file(&path)?;
    settings.database.url = Some(url.to_string());
    settings.save(&path)?;
    println!("Updated {}", path.display());
    Ok(())
}

fn db_status(db_url_flag: Option<&str>) -> CliResult<()> {
    let path = config_file();
    let presence = if path.exists() { "present" } else { "missing" };
    println!("Config file: {} ({presence})", path.display());

    let settings = Settings::load()?;
    match settings.database_url(db_url_flag) {
        Some(url) => match DatabaseType::from_url(&url) {
            Ok(db) => println!("Database: {} ({db})", redact_url(&url)),
            Err(err) => println!("Database: {} (invalid: {err})", redact_url(&url)),
        },
        None => println!("Database: not configured"),
    }
    Ok(())
}

fn reddit_status() -> CliResult<()> {
    let path = config_file();
    let presence = if path.exists() { "present" } else { "missing" };
    println!("Config file: {} ({presence})", path.display());

    let settings = Settings::load()?;
    match settings.reddit_credentials() {
        Some(creds) if creds.username.is_some() => {
            println!("Reddit: configured (password grant; read and write tools)")
        }
        Some(_) => println!("Reddit: configured (client credentials; read tools only)"),
        None => println!("Reddit: not configured (anonymous read-only mode)"),
    }
    println!("User-Agent: {}", settings.user_agent());
    Ok(())
}
