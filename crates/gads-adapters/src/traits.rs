//! Core adapter abstractions.
//!
//! An [`Adapter`] wraps one Google Ads resource family (budgets, campaigns,
//! keywords, ...) and exposes it as a set of named tools. Adapters hold an
//! [`Arc`](std::sync::Arc) of the shared API client and no other state, so a
//! single instance serves concurrent calls without locking.

use async_trait::async_trait;
use gads_api::MutateResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdapterError, Result};

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

/// Describes a tool the adapter exposes, advertised verbatim over MCP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name, e.g. "budget_create".
    pub name: String,

    /// One-line summary surfaced in tool listings.
    pub description: String,

    /// JSON Schema describing the tool's parameters.
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

// ---------------------------------------------------------------------------
// Adapter trait
// ---------------------------------------------------------------------------

/// A connector for one Google Ads resource family.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Unique identifier for this adapter, e.g. "budgets".
    fn id(&self) -> &str;

    /// Human-readable description of the resource family.
    fn description(&self) -> &str;

    /// The tools this adapter exposes.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Run the named tool against the API.
    ///
    /// The returned value is the API response as plain JSON. Unknown tool
    /// names fail with [`AdapterError::ToolNotFound`](crate::error::AdapterError::ToolNotFound).
    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value>;
}

/// Run a tool through an adapter, logging failures exactly once.
///
/// Transports call this instead of `execute_tool` directly so a failing
/// call produces a single structured error record no matter how deep the
/// failure originated.
pub async fn dispatch(adapter: &dyn Adapter, tool_name: &str, params: Value) -> Result<Value> {
    match adapter.execute_tool(tool_name, params).await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::error!(
                adapter_id = %adapter.id(),
                tool = %tool_name,
                kind = ?err.kind(),
                error = %err,
                "tool call failed"
            );
            Err(err)
        }
    }
}

/// Shape a mutate response into tool output.
///
/// When the caller did not opt into partial failure, a partial-failure
/// error in the response is promoted to a hard error. Otherwise the
/// response passes through intact so the caller can inspect which rows
/// succeeded.
pub fn settle_mutate(response: MutateResponse, partial_failure: bool) -> Result<Value> {
    let response = if partial_failure {
        response
    } else {
        response
            .require_all_succeeded()
            .map_err(|failure| AdapterError::PartialFailure { failure })?
    };
    Ok(serde_json::to_value(response)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gads_api::GoogleAdsFailure;
    use serde_json::json;

    struct EchoAdapter;

    #[async_trait]
    impl Adapter for EchoAdapter {
        fn id(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "test adapter"
        }

        fn tools(&self) -> Vec<ToolDefinition> {
            vec![ToolDefinition::new("echo", "echoes params", json!({"type": "object"}))]
        }

        async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
            match tool_name {
                "echo" => Ok(params),
                _ => Err(AdapterError::ToolNotFound {
                    adapter_id: self.id().to_string(),
                    tool_name: tool_name.to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn dispatch_passes_through_success() {
        let adapter = EchoAdapter;
        let result = dispatch(&adapter, "echo", json!({"a": 1})).await.unwrap();
        assert_eq!(result, json!({"a": 1}));
    }

    #[tokio::test]
    async fn dispatch_preserves_the_error() {
        let adapter = EchoAdapter;
        let err = dispatch(&adapter, "nope", json!({})).await.unwrap_err();
        assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    }

    #[test]
    fn tool_definition_serializes_schema_verbatim() {
        let def = ToolDefinition::new("t", "d", json!({"type": "object", "required": ["x"]}));
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["input_schema"]["required"], json!(["x"]));
    }

    // -- Mutate settlement --

    fn partially_failed() -> MutateResponse {
        MutateResponse {
            partial_failure_error: Some(GoogleAdsFailure {
                code: 3,
                message: "operation 1 rejected".into(),
                details: Vec::new(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn settle_promotes_unrequested_partial_failure() {
        let err = settle_mutate(partially_failed(), false).unwrap_err();
        assert!(matches!(err, AdapterError::PartialFailure { .. }));
        assert!(err.to_string().contains("operation 1 rejected"));
    }

    #[test]
    fn settle_passes_partial_failure_through_when_requested() {
        let value = settle_mutate(partially_failed(), true).unwrap();
        assert_eq!(value["partialFailureError"]["message"], "operation 1 rejected");
    }
}
