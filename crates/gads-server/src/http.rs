//! HTTP transport.
//!
//! Serves the MCP protocol at `POST /mcp`, accepting a single JSON-RPC
//! request object or an array of them (batch mode), plus two small
//! read-only endpoints: `GET /api/status` and `GET /api/adapters`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use gads_core::AdapterInfo;

use crate::mcp::{INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse, McpServer, PARSE_ERROR};
use crate::state::AppState;
use crate::{HttpConfig, ServerError};

/// The HTTP-facing MCP server.
pub struct HttpServer {
    config: HttpConfig,
    state: Arc<HttpState>,
}

/// Router state: the shared app state plus the protocol core with its
/// prebuilt tool index.
struct HttpState {
    app: Arc<AppState>,
    mcp: McpServer,
}

impl HttpServer {
    /// Create a new HTTP server over the shared state.
    pub fn new(config: HttpConfig, app: Arc<AppState>) -> Self {
        let mcp = McpServer::new(app.adapters.clone());
        Self {
            config,
            state: Arc::new(HttpState { app, mcp }),
        }
    }

    /// The `host:port` string this server binds.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Wire the MCP endpoint and the status routes into one router.
    fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        Router::new()
            .route("/mcp", post(handle_mcp_request))
            .route("/api/status", get(status))
            .route("/api/adapters", get(adapters))
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!(addr = %addr, "starting HTTP server");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /mcp`: one JSON-RPC request or a batch array.
///
/// Notifications produce no response object; a batch of only notifications
/// answers with an empty array, a lone notification with `null`.
async fn handle_mcp_request(State(state): State<Arc<HttpState>>, body: String) -> Json<Value> {
    if let Ok(batch) = serde_json::from_str::<Vec<JsonRpcRequest>>(&body) {
        if batch.is_empty() {
            return Json(json!(JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                "batch must not be empty",
            )));
        }
        let mut replies = Vec::with_capacity(batch.len());
        for item in batch {
            if let Some(reply) = state.mcp.handle_request(item).await {
                replies.push(reply);
            }
        }
        return Json(json!(replies));
    }

    match serde_json::from_str::<JsonRpcRequest>(&body) {
        Ok(request) => match state.mcp.handle_request(request).await {
            Some(response) => Json(json!(response)),
            None => Json(Value::Null),
        },
        Err(e) => Json(json!(JsonRpcResponse::error(
            None,
            PARSE_ERROR,
            format!("body did not parse as JSON-RPC: {e}"),
        ))),
    }
}

/// Response payload for `GET /api/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    version: &'static str,
    adapter_count: usize,
    tool_count: usize,
    uptime_seconds: u64,
}

async fn status(State(state): State<Arc<HttpState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        adapter_count: state.app.registry.count(),
        tool_count: state.app.registry.total_tools(),
        uptime_seconds: state.app.started_at.elapsed().as_secs(),
    })
}

async fn adapters(State(state): State<Arc<HttpState>>) -> Json<Vec<AdapterInfo>> {
    Json(state.app.registry.list_all())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
