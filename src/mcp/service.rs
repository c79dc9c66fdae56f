//! MCP service creation and serving.
//!
//! Both binaries default to the stdio transport (the way MCP clients spawn
//! local servers) and switch to the Streamable HTTP transport when
//! `--listen` is given, in which case the service is nested into an Axum
//! router.

use std::net::SocketAddr;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{ServerHandler, ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with an env filter.
///
/// Logs go to stderr: in stdio mode stdout carries the MCP protocol.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolgate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Serve one MCP session over stdin/stdout until the client disconnects.
pub async fn serve_stdio<S>(server: S) -> Result<(), Box<dyn std::error::Error>>
where
    S: ServerHandler,
{
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Serve the Streamable HTTP transport on `addr`, under `/mcp`.
///
/// A new server instance is handed out per session; Ctrl-C cancels the
/// session manager and drains the Axum listener.
pub async fn serve_http<S>(server: S, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>>
where
    S: ServerHandler + Clone + Send + Sync + 'static,
{
    let cancellation_token = CancellationToken::new();

    // Service factory: creates a new server instance per session.
    // Returns io::Error to match rmcp's expected signature.
    let service_factory = {
        let server = server.clone();
        move || -> Result<S, std::io::Error> { Ok(server.clone()) }
    };

    let mut config = StreamableHttpServerConfig::default();
    config.sse_keep_alive = None;
    config.sse_retry = None;
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token.clone();

    let mcp_service = StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    );

    let app = axum::Router::new()
        .nest_service("/mcp", mcp_service)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{addr}/mcp");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            cancellation_token.cancel();
        })
        .await?;
    Ok(())
}
