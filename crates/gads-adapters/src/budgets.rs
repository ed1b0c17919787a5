//! Campaign budget tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::CampaignBudget;
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::{BudgetDeliveryMethod, ResponseContentType};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "campaignBudgets";

/// Adapter for campaign budgets.
pub struct BudgetsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl BudgetsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "budgets".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "budget_create";
        let customer = params::customer_id(&params, TOOL)?;
        let name = params::required_str(&params, TOOL, "name")?;
        let amount_micros = params::required_i64(&params, TOOL, "amount_micros")?;
        let delivery_method = params::enum_or(
            &params,
            TOOL,
            "delivery_method",
            BudgetDeliveryMethod::Standard,
        )?;
        let explicitly_shared = params::bool_or(&params, "explicitly_shared", false);
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let response_content_type: Option<ResponseContentType> =
            params::parse_enum(&params, TOOL, "response_content_type")?;

        debug!(customer_id = %customer, name, amount_micros, "Creating campaign budget");

        let budget = CampaignBudget {
            name: Some(name.to_string()),
            amount_micros: Some(amount_micros),
            delivery_method: Some(delivery_method),
            explicitly_shared: Some(explicitly_shared),
            ..Default::default()
        };
        let request = MutateRequest::new(vec![Operation::create(budget)])
            .partial_failure(partial_failure)
            .validate_only(validate_only)
            .response_content_type(response_content_type);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "budget_update";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating campaign budget");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "budget_list";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let query = GaqlQuery::select(
            &[
                "campaign_budget.id",
                "campaign_budget.name",
                "campaign_budget.amount_micros",
                "campaign_budget.status",
                "campaign_budget.delivery_method",
                "campaign_budget.explicitly_shared",
            ],
            "campaign_budget",
        )
        .order_by("campaign_budget.id")
        .limit(limit)
        .build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}

/// Build the sparse update operation; the mask lists exactly the supplied
/// fields.
fn build_update(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Operation<CampaignBudget>> {
    let budget_id = params::required_id(params, tool, "budget_id")?;
    let resource_name = ResourceName::campaign_budget(customer, &budget_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let budget = CampaignBudget {
        resource_name: Some(resource_name.into_string()),
        name: params::optional_string(params, "name"),
        amount_micros: params::optional_i64(params, tool, "amount_micros")?,
        delivery_method: params::parse_enum(params, tool, "delivery_method")?,
        explicitly_shared: params::optional_bool(params, tool, "explicitly_shared")?,
    };

    let mut mask = FieldMask::new();
    mask.maybe("name", &budget.name)
        .maybe("amount_micros", &budget.amount_micros)
        .maybe("delivery_method", &budget.delivery_method)
        .maybe("explicitly_shared", &budget.explicitly_shared);
    if mask.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            "no updatable fields were provided",
        ));
    }
    Ok(Operation::update(budget, mask))
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "budget_create",
            "Create a campaign budget",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "name": {"type": "string", "description": "Budget name, unique within the account"},
                    "amount_micros": {"type": ["integer", "string"], "description": "Daily amount in micros (1000000 = one currency unit)"},
                    "delivery_method": {"type": "string", "enum": BudgetDeliveryMethod::wire_names(), "description": "Spending cadence, default STANDARD"},
                    "explicitly_shared": {"type": "boolean", "description": "Allow multiple campaigns to share this budget"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"},
                    "response_content_type": {"type": "string", "enum": ResponseContentType::wire_names(), "description": "How much of the mutated resource to return"}
                },
                "required": ["customer_id", "name", "amount_micros"]
            }),
        ),
        ToolDefinition::new(
            "budget_update",
            "Update fields of an existing campaign budget",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "budget_id": {"type": ["integer", "string"], "description": "Budget ID"},
                    "name": {"type": "string", "description": "New budget name"},
                    "amount_micros": {"type": ["integer", "string"], "description": "New daily amount in micros"},
                    "delivery_method": {"type": "string", "enum": BudgetDeliveryMethod::wire_names(), "description": "New spending cadence"},
                    "explicitly_shared": {"type": "boolean", "description": "Allow multiple campaigns to share this budget"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "budget_id"]
            }),
        ),
        ToolDefinition::new(
            "budget_list",
            "List campaign budgets in an account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 50"}
                },
                "required": ["customer_id"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for BudgetsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Campaign budget management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "budget_create" => self.tool_create(params).await,
            "budget_update" => self.tool_update(params).await,
            "budget_list" => self.tool_list(params).await,
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

    fn adapter() -> BudgetsAdapter {
        BudgetsAdapter::new(test_client())
    }

    // -- Tool definitions --

    #[test]
    fn exposes_exactly_three_tools() {
        let names: Vec<String> = build_tool_definitions()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["budget_create", "budget_update", "budget_list"]);
    }

    #[test]
    fn create_requires_customer_name_and_amount() {
        let tools = build_tool_definitions();
        let create = tools.iter().find(|t| t.name == "budget_create").unwrap();
        assert_eq!(
            create.input_schema["required"],
            json!(["customer_id", "name", "amount_micros"])
        );
        assert_eq!(
            create.input_schema["properties"]["delivery_method"]["enum"],
            json!(["STANDARD", "ACCELERATED"])
        );
    }

    // -- Update operations --

    #[test]
    fn update_mask_lists_only_supplied_fields() {
        let customer = CustomerId::new("1234567890").unwrap();
        let op = build_update(
            "budget_update",
            &customer,
            &json!({"budget_id": 99, "amount_micros": "2500000"}),
        )
        .unwrap();

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["updateMask"], "amount_micros");
        assert_eq!(
            value["update"]["resourceName"],
            "customers/1234567890/campaignBudgets/99"
        );
        assert_eq!(value["update"]["amountMicros"], "2500000");
        assert!(value["update"].get("name").is_none());
    }

    #[test]
    fn update_with_no_fields_is_rejected() {
        let customer = CustomerId::new("1234567890").unwrap();
        let err = build_update("budget_update", &customer, &json!({"budget_id": 99})).unwrap_err();
        assert!(err.to_string().contains("no updatable fields"));
    }

    #[test]
    fn update_collects_every_supplied_field() {
        let customer = CustomerId::new("1234567890").unwrap();
        let op = build_update(
            "budget_update",
            &customer,
            &json!({
                "budget_id": "7",
                "name": "Q3 Budget",
                "amount_micros": 10_000_000,
                "delivery_method": "ACCELERATED",
                "explicitly_shared": true
            }),
        )
        .unwrap();

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value["updateMask"],
            "name,amount_micros,delivery_method,explicitly_shared"
        );
        assert_eq!(value["update"]["deliveryMethod"], "ACCELERATED");
    }

    // -- Dispatch --

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let err = adapter()
            .execute_tool("budget_destroy", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn create_fails_before_any_request_without_name() {
        let err = adapter()
            .execute_tool("budget_create", json!({"customer_id": "123-456-7890"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'name' is required"));
    }

    #[tokio::test]
    async fn create_rejects_bad_delivery_method() {
        let err = adapter()
            .execute_tool(
                "budget_create",
                json!({
                    "customer_id": "1234567890",
                    "name": "B",
                    "amount_micros": 1,
                    "delivery_method": "FAST"
                }),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("FAST"));
    }
}
