//! stdio transport.
//!
//! Line-delimited JSON-RPC over stdin/stdout, the transport MCP clients
//! use when they spawn the server as a subprocess. One request (or batch)
//! per line in, one response (or batch) per line out; notifications and
//! blank lines produce no output. Stdout carries protocol bytes only, so
//! all logging must already be routed to stderr before [`StdioServer::run`]
//! is called.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::ServerError;
use crate::mcp::{INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse, McpServer, PARSE_ERROR};
use crate::state::AppState;

/// The stdin/stdout-facing MCP server.
pub struct StdioServer {
    mcp: McpServer,
}

impl StdioServer {
    /// Create a new stdio server over the shared state.
    pub fn new(app: Arc<AppState>) -> Self {
        Self {
            mcp: McpServer::new(app.adapters.clone()),
        }
    }

    /// Serve until stdin closes or a shutdown signal arrives.
    pub async fn run(self) -> Result<(), ServerError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!("stdio transport ready");

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if let Some(reply) = self.process_line(&line).await {
                            stdout.write_all(reply.as_bytes()).await?;
                            stdout.write_all(b"\n").await?;
                            stdout.flush().await?;
                        }
                    }
                    None => {
                        tracing::info!("stdin closed, shutting down");
                        break;
                    }
                },
                _ = &mut ctrl_c => {
                    tracing::info!("shutdown signal received");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handle one input line. Returns `None` when nothing should be
    /// written back (blank lines, notifications).
    async fn process_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Ok(batch) = serde_json::from_str::<Vec<JsonRpcRequest>>(line) {
            if batch.is_empty() {
                return serialize_reply(&JsonRpcResponse::error(
                    None,
                    INVALID_REQUEST,
                    "batch must not be empty",
                ));
            }
            let mut responses = Vec::with_capacity(batch.len());
            for request in batch {
                if let Some(response) = self.mcp.handle_request(request).await {
                    responses.push(response);
                }
            }
            if responses.is_empty() {
                return None;
            }
            return serialize_reply(&responses);
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => {
                let response = self.mcp.handle_request(request).await?;
                serialize_reply(&response)
            }
            Err(e) => serialize_reply(&JsonRpcResponse::error(
                None,
                PARSE_ERROR,
                format!("line did not parse as JSON-RPC: {e}"),
            )),
        }
    }
}

fn serialize_reply<T: serde::Serialize>(reply: &T) -> Option<String> {
    match serde_json::to_string(reply) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize reply");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn server() -> StdioServer {
        StdioServer::new(Arc::new(AppState::new(vec![])))
    }

    // -- Line handling --

    #[tokio::test]
    async fn ping_line_answers_one_line() {
        let reply = server()
            .process_line(r#"{"jsonrpc": "2.0", "id": 7, "method": "ping"}"#)
            .await
            .expect("ping should be answered");
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["result"], json!({}));
        assert!(!reply.contains('\n'));
    }

    #[tokio::test]
    async fn blank_lines_and_notifications_stay_silent() {
        let srv = server();
        assert!(srv.process_line("").await.is_none());
        assert!(srv.process_line("   ").await.is_none());
        assert!(
            srv.process_line(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn garbage_line_answers_parse_error() {
        let reply = server()
            .process_line("this is not json")
            .await
            .expect("parse errors are answered");
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }

    #[tokio::test]
    async fn batch_line_answers_array_without_notifications() {
        let reply = server()
            .process_line(
                r#"[{"jsonrpc": "2.0", "id": 1, "method": "ping"},
                    {"jsonrpc": "2.0", "method": "notifications/initialized"},
                    {"jsonrpc": "2.0", "id": 2, "method": "tools/list"}]"#,
            )
            .await
            .expect("batch with ids should be answered");
        let value: Value = serde_json::from_str(&reply).unwrap();
        let responses = value.as_array().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], 2);
    }

    #[tokio::test]
    async fn all_notification_batch_stays_silent() {
        let reply = server()
            .process_line(r#"[{"jsonrpc": "2.0", "method": "notifications/initialized"}]"#)
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn empty_batch_is_invalid_request() {
        let reply = server().process_line("[]").await.expect("answered");
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], INVALID_REQUEST);
    }
}
