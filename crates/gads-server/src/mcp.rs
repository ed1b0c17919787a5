//! MCP (Model Context Protocol) JSON-RPC 2.0 core.
//!
//! Transport-independent handling of `initialize`, `ping`, `tools/list`,
//! and `tools/call`. Tool execution failures are answered as successful
//! JSON-RPC responses carrying an `isError: true` text result, so a
//! connected agent always receives a payload it can read; protocol errors
//! are reserved for malformed requests and unknown methods.
//!
//! Targets MCP protocol version `2024-11-05`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use gads_adapters::{Adapter, dispatch};

/// MCP protocol revision spoken by this server.
const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name announced in the `initialize` result.
const SERVER_NAME: &str = "gads-mcp";

/// Version announced in the `initialize` result.
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// JSON-RPC types
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request. A request without an `id` is a notification
/// and receives no response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be `"2.0"`.
    pub jsonrpc: String,
    /// Request identifier; absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    /// Name of the method being invoked.
    pub method: String,
    /// Parameters for the method; `null` when the caller sent none.
    #[serde(default)]
    pub params: Value,
}

/// Response half of a JSON-RPC 2.0 exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Mirrors the id of the request being answered.
    pub id: Option<Value>,
    /// Set when the call succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Set when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// Error payload carried by a failed JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric code; the -327xx range belongs to JSON-RPC itself.
    pub code: i32,
    /// Short description of what went wrong.
    pub message: String,
    /// Extra structured detail, when there is any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// Reserved JSON-RPC error codes.
pub(crate) const PARSE_ERROR: i32 = -32700;
pub(crate) const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

impl JsonRpcResponse {
    /// Build a response carrying `result`.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build a response carrying an error object.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MCP-specific types
// ---------------------------------------------------------------------------

/// Tool descriptor in the shape `tools/list` clients expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    /// Unique tool name used for dispatch.
    pub name: String,
    /// One-line summary shown to the calling agent.
    pub description: String,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Payload answered to a `tools/call` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    /// Content blocks making up the reply.
    pub content: Vec<McpContent>,
    /// Marks the result as a tool-level failure.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// One block of tool output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpContent {
    /// The content type (always `"text"` here).
    #[serde(rename = "type")]
    pub content_type: String,
    /// The block's text.
    pub text: String,
}

impl McpContent {
    /// Wrap a string as a text block.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: "text".into(),
            text: value.into(),
        }
    }
}

impl McpToolResult {
    /// Single-block success result.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::text(text)],
            is_error: None,
        }
    }

    /// Single-block failure result.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::text(text)],
            is_error: Some(true),
        }
    }
}

// ---------------------------------------------------------------------------
// McpServer
// ---------------------------------------------------------------------------

/// Protocol core that fronts a set of adapters as MCP tools.
///
/// Tool names are resolved through an index built once at construction,
/// so `tools/call` never rescans adapter catalogues.
pub struct McpServer {
    adapters: Vec<Arc<dyn Adapter>>,
    tool_index: HashMap<String, usize>,
}

impl McpServer {
    /// Index the adapters' tools and assemble the server.
    pub fn new(adapters: Vec<Arc<dyn Adapter>>) -> Self {
        let mut tool_index = HashMap::new();
        for (pos, adapter) in adapters.iter().enumerate() {
            for tool in adapter.tools() {
                if tool_index.insert(tool.name.clone(), pos).is_some() {
                    tracing::warn!(
                        tool = %tool.name,
                        adapter_id = %adapter.id(),
                        "duplicate tool name, later registration wins"
                    );
                }
            }
        }
        Self {
            adapters,
            tool_index,
        }
    }

    /// Handle a single JSON-RPC request.
    ///
    /// Returns `None` for notifications (requests without an `id`), which
    /// must not be answered.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "dispatching MCP request");
        let is_notification = request.id.is_none();

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            method if method.starts_with("notifications/") => {
                // Lifecycle notifications like notifications/initialized
                // need no action; the response is discarded below.
                JsonRpcResponse::success(request.id, json!({}))
            }
            other => {
                tracing::warn!(method = %other, "MCP method not recognized");
                JsonRpcResponse::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("method '{other}' not found"),
                )
            }
        };

        if is_notification { None } else { Some(response) }
    }

    /// Answer the `initialize` handshake.
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    /// Answer `tools/list` with the merged adapter catalogue.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let catalogue = self.list_tools();
        match serde_json::to_value(&catalogue) {
            Ok(value) => JsonRpcResponse::success(id, json!({ "tools": value })),
            Err(e) => {
                tracing::error!(error = %e, "tool list serialization failed");
                JsonRpcResponse::error(id, INTERNAL_ERROR, "tool list serialization failed")
            }
        }
    }

    /// Handle `tools/call` by dispatching to the owning adapter.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "'name' is required in params");
        };
        let arguments = match params.get("arguments") {
            Some(v) => v.clone(),
            None => json!({}),
        };

        let outcome = self.call_tool(name, arguments).await;
        match serde_json::to_value(&outcome) {
            Ok(payload) => JsonRpcResponse::success(id, payload),
            Err(e) => {
                tracing::error!(error = %e, "tool result serialization failed");
                JsonRpcResponse::error(id, INTERNAL_ERROR, "tool result serialization failed")
            }
        }
    }

    /// Merge every adapter's tools into one list.
    fn list_tools(&self) -> Vec<McpToolDefinition> {
        let mut catalogue = Vec::new();
        for adapter in &self.adapters {
            for tool in adapter.tools() {
                catalogue.push(McpToolDefinition {
                    name: tool.name,
                    description: tool.description,
                    input_schema: tool.input_schema,
                });
            }
        }
        catalogue
    }

    /// Execute a tool call. Failures of any kind come back as `isError`
    /// results tagged with the error's classification.
    async fn call_tool(&self, name: &str, arguments: Value) -> McpToolResult {
        let Some(&pos) = self.tool_index.get(name) else {
            return McpToolResult::error(format!("[validation] unknown tool: {name}"));
        };

        match dispatch(self.adapters[pos].as_ref(), name, arguments).await {
            Ok(Value::String(text)) => McpToolResult::success(text),
            Ok(body) => {
                let text = match serde_json::to_string_pretty(&body) {
                    Ok(pretty) => pretty,
                    Err(_) => body.to_string(),
                };
                McpToolResult::success(text)
            }
            Err(e) => McpToolResult::error(format!("[{}] {e}", e.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
