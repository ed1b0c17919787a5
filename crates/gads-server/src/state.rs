//! Shared application state.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across both transports.
//! The registry is populated once at construction; adapters are stateless,
//! so nothing here changes after startup besides the uptime clock.

use std::sync::Arc;
use std::time::Instant;

use gads_adapters::Adapter;
use gads_core::AdapterRegistry;

/// State shared by every request handler.
pub struct AppState {
    /// Mounted resource adapters, in registration order.
    pub adapters: Vec<Arc<dyn Adapter>>,

    /// Adapter metadata for the status surfaces.
    pub registry: AdapterRegistry,

    /// Server start time, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Build the shared state and register every adapter.
    pub fn new(adapters: Vec<Arc<dyn Adapter>>) -> Self {
        let registry = AdapterRegistry::new();
        for adapter in &adapters {
            registry.register(adapter.id(), adapter.description(), adapter.tools().len());
        }
        Self {
            adapters,
            registry,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gads_adapters::{AdapterError, ToolDefinition};
    use serde_json::{Value, json};

    struct NullAdapter;

    #[async_trait]
    impl Adapter for NullAdapter {
        fn id(&self) -> &str {
            "null"
        }

        fn description(&self) -> &str {
            "Does nothing"
        }

        fn tools(&self) -> Vec<ToolDefinition> {
            vec![
                ToolDefinition::new("null_a", "a", json!({"type": "object"})),
                ToolDefinition::new("null_b", "b", json!({"type": "object"})),
            ]
        }

        async fn execute_tool(
            &self,
            tool_name: &str,
            _params: Value,
        ) -> gads_adapters::Result<Value> {
            Err(AdapterError::ToolNotFound {
                adapter_id: "null".into(),
                tool_name: tool_name.into(),
            })
        }
    }

    #[test]
    fn construction_registers_adapters() {
        let state = AppState::new(vec![Arc::new(NullAdapter)]);
        assert_eq!(state.registry.count(), 1);
        assert_eq!(state.registry.total_tools(), 2);
        assert!(state.registry.contains("null"));
    }
}
