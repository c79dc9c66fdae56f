//! MCP transport glue shared by both servers.
//!
//! - `result`: helpers converting handler output and errors into
//!   `CallToolResult` content blocks
//! - `service`: stdio serving (the default) and the Streamable HTTP
//!   service behind `--listen`

mod result;
mod service;


pub use result::{error_result, text_result};
pub use service::{init_tracing, serve_http, serve_stdio};
