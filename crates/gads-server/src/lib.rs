//! MCP transports for the Google Ads tool server.
//!
//! One protocol core, two transports:
//!
//! - [`mcp::McpServer`] speaks MCP JSON-RPC 2.0: `initialize`, `ping`,
//!   `tools/list`, and `tools/call`, with tool failures reported as
//!   `isError` text results rather than protocol errors.
//! - [`stdio::StdioServer`] serves line-delimited JSON-RPC over
//!   stdin/stdout, the transport MCP clients spawn as a subprocess.
//! - [`http::HttpServer`] serves the same protocol at `POST /mcp` (single
//!   or batch) plus small status endpoints under `/api`.

pub mod http;
pub mod mcp;
pub mod state;
pub mod stdio;

pub use http::HttpServer;
pub use mcp::McpServer;
pub use state::AppState;
pub use stdio::StdioServer;

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Interface the listener binds, e.g. "127.0.0.1".
    pub bind_addr: String,
    /// TCP port for the listener.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

/// Transport-level failures. Protocol-level problems never surface here;
/// they are answered in-band as JSON-RPC errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
