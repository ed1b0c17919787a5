//! Integration tests for the gads-server crate.
//!
//! These tests drive a full MCP conversation through the protocol core
//! with an in-memory echo adapter, plus transport configuration and
//! shared state. Socket-level coverage needs a bound port, so the
//! transports themselves are exercised at the handler layer in their
//! unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use gads_adapters::{Adapter, AdapterError, ToolDefinition};
use gads_server::mcp::{JsonRpcRequest, JsonRpcResponse};
use gads_server::{AppState, HttpConfig, McpServer};
use serde_json::{Value, json};

struct EchoAdapter;

#[async_trait]
impl Adapter for EchoAdapter {
    fn id(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "In-memory echo adapter"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "echo_params",
                "Echoes its arguments back",
                json!({"type": "object", "properties": {}}),
            ),
            ToolDefinition::new(
                "echo_reject",
                "Refuses every call",
                json!({"type": "object", "properties": {}}),
            ),
        ]
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> gads_adapters::Result<Value> {
        match tool_name {
            "echo_params" => Ok(params),
            "echo_reject" => Err(AdapterError::invalid_params(
                "echo_reject",
                "'customer_id' is required",
            )),
            other => Err(AdapterError::ToolNotFound {
                adapter_id: "echo".into(),
                tool_name: other.into(),
            }),
        }
    }
}

fn server() -> McpServer {
    McpServer::new(vec![Arc::new(EchoAdapter)])
}

fn request(body: Value) -> JsonRpcRequest {
    serde_json::from_value(body).unwrap()
}

async fn roundtrip(server: &McpServer, body: Value) -> JsonRpcResponse {
    server.handle_request(request(body)).await.unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
//  MCP conversation
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn initialize_then_list_then_call() {
    let server = server();

    let response = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;
    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "gads-mcp");

    let response = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;
    let result = response.result.unwrap();
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "echo_params");
    assert!(tools[0].get("inputSchema").is_some());

    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": {"name": "echo_params", "arguments": {"customer_id": "123"}}
        }),
    )
    .await;
    let result = response.result.unwrap();
    assert!(result.get("isError").is_none());
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("customer_id"));
}

#[tokio::test]
async fn tool_failure_is_a_payload_not_a_protocol_error() {
    let server = server();
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {"name": "echo_reject", "arguments": {}}
        }),
    )
    .await;

    // The JSON-RPC layer reports success; the failure rides inside.
    assert!(response.error.is_none());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("[validation]"));
    assert!(text.contains("'customer_id' is required"));
}

#[tokio::test]
async fn unknown_tool_is_also_a_payload() {
    let server = server();
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "echo_gone", "arguments": {}}
        }),
    )
    .await;

    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("unknown tool: echo_gone")
    );
}

#[tokio::test]
async fn notifications_receive_no_response() {
    let server = server();
    let reply = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        })))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn unknown_method_with_id_is_method_not_found() {
    let server = server();
    let response = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"}),
    )
    .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("resources/list"));
}

// ═══════════════════════════════════════════════════════════════════════
//  State and configuration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn app_state_registers_every_adapter() {
    let state = AppState::new(vec![Arc::new(EchoAdapter)]);
    assert_eq!(state.registry.count(), 1);
    assert_eq!(state.registry.total_tools(), 2);
    assert!(state.registry.contains("echo"));
}

#[test]
fn http_config_defaults() {
    let config = HttpConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.port, 8080);
}

#[test]
fn http_config_custom() {
    let config = HttpConfig {
        bind_addr: "0.0.0.0".into(),
        port: 9090,
    };
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 9090);
}
