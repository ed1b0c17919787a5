//! Recommendation tools.
//!
//! Recommendation IDs are opaque strings assigned by the API, so the
//! apply and dismiss tools accept either bare IDs or full resource names
//! and normalize to the latter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::request::{RecommendationActionRequest, RecommendationOperation};
use gads_api::{GoogleAdsClient, SearchRequest};
use gads_core::{CustomerId, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

/// Adapter for recommendations.
pub struct RecommendationsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl RecommendationsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "recommendations".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "recommendation_list";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let mut query = GaqlQuery::select(
            &[
                "recommendation.resource_name",
                "recommendation.type",
                "recommendation.dismissed",
                "recommendation.campaign",
            ],
            "recommendation",
        );
        if let Some(rtype) = params::optional_str(&params, "recommendation_type") {
            if !is_wire_enum_name(rtype) {
                return Err(AdapterError::invalid_params(
                    TOOL,
                    format!("'recommendation_type' must be an UPPER_SNAKE_CASE type name, got '{rtype}'"),
                ));
            }
            query = query.and_where(format!("recommendation.type = '{rtype}'"));
        }
        let query = query.limit(limit).build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_apply(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "recommendation_apply";
        let customer = params::customer_id(&params, TOOL)?;
        let partial_failure = params::bool_or(&params, "partial_failure", false);
        let operations = build_operations(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Applying recommendations");

        let request = RecommendationActionRequest {
            operations,
            partial_failure,
        };
        let response = self.client.apply_recommendations(&customer, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_dismiss(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "recommendation_dismiss";
        let customer = params::customer_id(&params, TOOL)?;
        let partial_failure = params::bool_or(&params, "partial_failure", false);
        let operations = build_operations(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Dismissing recommendations");

        let request = RecommendationActionRequest {
            operations,
            partial_failure,
        };
        let response = self
            .client
            .dismiss_recommendations(&customer, &request)
            .await?;
        settle_mutate(response, partial_failure)
    }
}

// ---------------------------------------------------------------------------
// Operation builders
// ---------------------------------------------------------------------------

fn is_wire_enum_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// One operation per recommendation, in caller order. Entries may be bare
/// IDs or full `customers/.../recommendations/...` names.
fn build_operations(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<RecommendationOperation>> {
    let items = params::required_array(params, tool, "recommendation_ids")?;

    items
        .iter()
        .map(|item| {
            let resource_name = match item {
                Value::String(raw) if raw.starts_with("customers/") => {
                    ResourceName::from_raw(raw.clone())
                }
                Value::String(raw) => ResourceName::recommendation(customer, raw)
                    .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?,
                Value::Number(n) => ResourceName::recommendation(customer, &n.to_string())
                    .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?,
                _ => {
                    return Err(AdapterError::invalid_params(
                        tool,
                        "'recommendation_ids' entries must be strings or numbers",
                    ));
                }
            };
            Ok(RecommendationOperation { resource_name })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "recommendation_list",
            "List pending recommendations, optionally filtered by type",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "recommendation_type": {"type": "string", "description": "Only this recommendation type, e.g. KEYWORD or CAMPAIGN_BUDGET"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 50"}
                },
                "required": ["customer_id"]
            }),
        ),
        ToolDefinition::new(
            "recommendation_apply",
            "Apply recommendations",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "recommendation_ids": {
                        "type": "array",
                        "description": "Recommendation IDs or full resource names",
                        "items": {"type": "string"}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"}
                },
                "required": ["customer_id", "recommendation_ids"]
            }),
        ),
        ToolDefinition::new(
            "recommendation_dismiss",
            "Dismiss recommendations",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "recommendation_ids": {
                        "type": "array",
                        "description": "Recommendation IDs or full resource names",
                        "items": {"type": "string"}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"}
                },
                "required": ["customer_id", "recommendation_ids"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for RecommendationsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Recommendation listing and actioning"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "recommendation_list" => self.tool_list(params).await,
            "recommendation_apply" => self.tool_apply(params).await,
            "recommendation_dismiss" => self.tool_dismiss(params).await,
            _ => Err(AdapterError::ToolNotFound {
                adapter_id: self.id.clone(),
                tool_name: tool_name.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_client;

    fn cid() -> CustomerId {
        CustomerId::new("1234567890").unwrap()
    }

    // -- Tool definitions --

    #[test]
    fn exposes_exactly_three_tools() {
        let names: Vec<String> = build_tool_definitions()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "recommendation_list",
                "recommendation_apply",
                "recommendation_dismiss"
            ]
        );
    }

    // -- Operation builders --

    #[test]
    fn bare_ids_and_full_names_both_normalize() {
        let ops = build_operations(
            "recommendation_apply",
            &cid(),
            &json!({"recommendation_ids": [
                "abc-123",
                "customers/9999999999/recommendations/xyz",
                42
            ]}),
        )
        .unwrap();

        let names: Vec<&str> = ops.iter().map(|op| op.resource_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "customers/1234567890/recommendations/abc-123",
                "customers/9999999999/recommendations/xyz",
                "customers/1234567890/recommendations/42"
            ]
        );
    }

    #[test]
    fn non_string_entries_are_rejected() {
        let err = build_operations(
            "recommendation_apply",
            &cid(),
            &json!({"recommendation_ids": [true]}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("strings or numbers"));
    }

    #[test]
    fn type_filter_guard_accepts_wire_names_only() {
        assert!(is_wire_enum_name("CAMPAIGN_BUDGET"));
        assert!(is_wire_enum_name("KEYWORD"));
        assert!(!is_wire_enum_name("keyword"));
        assert!(!is_wire_enum_name("KEYWORD' OR 1=1"));
        assert!(!is_wire_enum_name(""));
    }

    // -- Dispatch --

    #[tokio::test]
    async fn list_rejects_lowercase_type_filter() {
        let adapter = RecommendationsAdapter::new(test_client());
        let err = adapter
            .execute_tool(
                "recommendation_list",
                json!({"customer_id": "1234567890", "recommendation_type": "keyword"}),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UPPER_SNAKE_CASE"));
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let adapter = RecommendationsAdapter::new(test_client());
        let err = adapter
            .execute_tool("recommendation_snooze", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    }
}
