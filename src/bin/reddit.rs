//! Reddit MCP server binary.
//!
//! Without credentials the server runs in anonymous read-only mode against
//! the public .json endpoints; with them it authenticates against
//! oauth.reddit.com and the publish tools become usable.

use std::sync::Arc;

use clap::Parser;
use miette::{Result, miette};
use toolgate::cli::{self, RedditCli};
use toolgate::config::Settings;
use toolgate::mcp;
use toolgate::reddit::{RedditClient, RedditServer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = RedditCli::parse();
    if cli::handle_reddit(&args)? {
        return Ok(());
    }

    mcp::init_tracing();

    let settings = Settings::load()?;
    let client = RedditClient::new(settings.reddit_credentials(), settings.user_agent());
    if client.is_authenticated() {
        info!("Reddit credentials configured, using oauth.reddit.com");
    } else {
        info!("no Reddit credentials, anonymous read-only mode");
    }

    let server = RedditServer::new(Arc::new(client));
    let served = match args.listen {
        Some(addr) => mcp::serve_http(server, addr).await,
        None => mcp::serve_stdio(server).await,
    };
    served.map_err(|e| miette!("{e}"))
}
