//! Database MCP server binary.
//!
//! Resolves the connection URL (flag > environment > config file), opens
//! the database handle once, and hands it to the server. The CLI layer
//! reports a handled flag instead of exiting so the whole surface stays
//! testable.

use std::sync::Arc;

use clap::Parser;
use miette::{Result, miette};
use toolgate::cli::{self, DbCli};
use toolgate::config::{Settings, redact_url};
use toolgate::db::{DbHandle, DbServer};
use toolgate::mcp;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = DbCli::parse();
    if cli::handle_db(&args)? {
        return Ok(());
    }

    mcp::init_tracing();

    let settings = Settings::load()?;
    let url = settings.database_url(args.db_url.as_deref()).ok_or_else(|| {
        miette!(
            "no database configured; run `toolgate-db init <url>`, pass --db-url, \
             or set TOOLGATE_DATABASE_URL"
        )
    })?;

    let handle = Arc::new(DbHandle::connect(&url).await?);
    info!(
        "connected to {} ({})",
        redact_url(&url),
        handle.database_type()
    );

    let server = DbServer::new(Arc::clone(&handle), redact_url(&url));
    let served = match args.listen {
        Some(addr) => mcp::serve_http(server, addr).await,
        None => mcp::serve_stdio(server).await,
    };
    handle.close().await;
    served.map_err(|e| miette!("{e}"))
}
