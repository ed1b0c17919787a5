//! Campaign tools.
//!
//! Creation wires the campaign to an existing budget, fixes manual CPC
//! bidding, and defaults to `PAUSED` so nothing serves before a human
//! reviews it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::{Campaign, ManualCpc, NetworkSettings};
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::{AdvertisingChannelType, CampaignStatus, ResponseContentType};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "campaigns";

/// Adapter for campaigns.
pub struct CampaignsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl CampaignsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "campaigns".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "campaign_create";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let response_content_type: Option<ResponseContentType> =
            params::parse_enum(&params, TOOL, "response_content_type")?;
        let campaign = build_create(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, name = campaign.name.as_deref(), "Creating campaign");

        let request = MutateRequest::new(vec![Operation::create(campaign)])
            .partial_failure(partial_failure)
            .validate_only(validate_only)
            .response_content_type(response_content_type);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "campaign_update";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating campaign");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "campaign_list";
        let customer = params::customer_id(&params, TOOL)?;
        let include_removed = params::bool_or(&params, "include_removed", false);
        let limit = params::limit_or(&params, TOOL, 1000)?;

        let query = GaqlQuery::select(
            &[
                "campaign.id",
                "campaign.name",
                "campaign.status",
                "campaign.advertising_channel_type",
                "campaign.bidding_strategy_type",
                "campaign.start_date",
                "campaign.end_date",
                "campaign_budget.amount_micros",
            ],
            "campaign",
        )
        .and_where_if(!include_removed, "campaign.status != 'REMOVED'")
        .order_by("campaign.id")
        .limit(limit)
        .build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn build_create(tool: &str, customer: &CustomerId, params: &Value) -> Result<Campaign> {
    let name = params::required_str(params, tool, "name")?;
    let budget_id = params::required_id(params, tool, "budget_id")?;
    let budget = ResourceName::campaign_budget(customer, &budget_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let channel_type = params::enum_or(
        params,
        tool,
        "advertising_channel_type",
        AdvertisingChannelType::Search,
    )?;
    let status = params::enum_or(params, tool, "status", CampaignStatus::Paused)?;

    Ok(Campaign {
        name: Some(name.to_string()),
        status: Some(status),
        advertising_channel_type: Some(channel_type),
        campaign_budget: Some(budget.into_string()),
        start_date: normalize_date(tool, "start_date", params)?,
        end_date: normalize_date(tool, "end_date", params)?,
        network_settings: Some(NetworkSettings {
            target_google_search: Some(params::bool_or(params, "target_google_search", true)),
            target_search_network: Some(params::bool_or(params, "target_search_network", true)),
            target_content_network: Some(params::bool_or(params, "target_content_network", true)),
            target_partner_search_network: Some(params::bool_or(
                params,
                "target_partner_search_network",
                false,
            )),
        }),
        manual_cpc: Some(ManualCpc::default()),
        ..Default::default()
    })
}

fn build_update(tool: &str, customer: &CustomerId, params: &Value) -> Result<Operation<Campaign>> {
    let campaign_id = params::required_id(params, tool, "campaign_id")?;
    let resource_name = ResourceName::campaign(customer, &campaign_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let campaign = Campaign {
        resource_name: Some(resource_name.into_string()),
        name: params::optional_string(params, "name"),
        status: params::parse_enum(params, tool, "status")?,
        start_date: normalize_date(tool, "start_date", params)?,
        end_date: normalize_date(tool, "end_date", params)?,
        ..Default::default()
    };

    let mut mask = FieldMask::new();
    mask.maybe("name", &campaign.name)
        .maybe("status", &campaign.status)
        .maybe("start_date", &campaign.start_date)
        .maybe("end_date", &campaign.end_date);
    if mask.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            "no updatable fields were provided",
        ));
    }
    Ok(Operation::update(campaign, mask))
}

/// Read a date param in `YYYY-MM-DD` form and return the `YYYYMMDD` wire
/// form. The bare wire form is also accepted.
fn normalize_date(tool: &str, field: &str, params: &Value) -> Result<Option<String>> {
    let Some(raw) = params::optional_str(params, field) else {
        return Ok(None);
    };
    let digits: String = raw.chars().filter(|c| *c != '-').collect();
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AdapterError::invalid_params(
            tool,
            format!("'{field}' must be a YYYY-MM-DD date, got '{raw}'"),
        ));
    }
    Ok(Some(digits))
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "campaign_create",
            "Create a campaign attached to an existing budget (paused by default)",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "name": {"type": "string", "description": "Campaign name"},
                    "budget_id": {"type": ["integer", "string"], "description": "ID of the campaign budget to attach"},
                    "advertising_channel_type": {"type": "string", "enum": AdvertisingChannelType::wire_names(), "description": "Serving channel, default SEARCH"},
                    "status": {"type": "string", "enum": CampaignStatus::wire_names(), "description": "Initial status, default PAUSED"},
                    "start_date": {"type": "string", "description": "Start date, YYYY-MM-DD"},
                    "end_date": {"type": "string", "description": "End date, YYYY-MM-DD"},
                    "target_google_search": {"type": "boolean", "description": "Serve on Google search results, default true"},
                    "target_search_network": {"type": "boolean", "description": "Serve on the search network, default true"},
                    "target_content_network": {"type": "boolean", "description": "Serve on the display network, default true"},
                    "target_partner_search_network": {"type": "boolean", "description": "Serve on partner search sites, default false"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"},
                    "response_content_type": {"type": "string", "enum": ResponseContentType::wire_names(), "description": "How much of the mutated resource to return"}
                },
                "required": ["customer_id", "name", "budget_id"]
            }),
        ),
        ToolDefinition::new(
            "campaign_update",
            "Update fields of an existing campaign",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "campaign_id": {"type": ["integer", "string"], "description": "Campaign ID"},
                    "name": {"type": "string", "description": "New campaign name"},
                    "status": {"type": "string", "enum": CampaignStatus::wire_names(), "description": "New status"},
                    "start_date": {"type": "string", "description": "New start date, YYYY-MM-DD"},
                    "end_date": {"type": "string", "description": "New end date, YYYY-MM-DD"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "campaign_id"]
            }),
        ),
        ToolDefinition::new(
            "campaign_list",
            "List campaigns in an account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "include_removed": {"type": "boolean", "description": "Include removed campaigns, default false"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 1000"}
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
impl Adapter for CampaignsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Campaign management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "campaign_create" => self.tool_create(params).await,
            "campaign_update" => self.tool_update(params).await,
            "campaign_list" => self.tool_list(params).await,
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
            vec!["campaign_create", "campaign_update", "campaign_list"]
        );
    }

    #[test]
    fn create_requires_budget() {
        let tools = build_tool_definitions();
        let create = tools.iter().find(|t| t.name == "campaign_create").unwrap();
        assert_eq!(
            create.input_schema["required"],
            json!(["customer_id", "name", "budget_id"])
        );
    }

    // -- Create payloads --

    #[test]
    fn create_defaults_to_paused_search_with_manual_cpc() {
        let campaign = build_create(
            "campaign_create",
            &cid(),
            &json!({"name": "Spring Sale", "budget_id": 42}),
        )
        .unwrap();

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["status"], "PAUSED");
        assert_eq!(value["advertisingChannelType"], "SEARCH");
        assert_eq!(
            value["campaignBudget"],
            "customers/1234567890/campaignBudgets/42"
        );
        assert_eq!(value["manualCpc"], json!({}));
        assert_eq!(value["networkSettings"]["targetGoogleSearch"], true);
        assert_eq!(value["networkSettings"]["targetPartnerSearchNetwork"], false);
    }

    #[test]
    fn create_normalizes_dates_to_wire_form() {
        let campaign = build_create(
            "campaign_create",
            &cid(),
            &json!({
                "name": "Spring Sale",
                "budget_id": 42,
                "start_date": "2025-03-01",
                "end_date": "20250630"
            }),
        )
        .unwrap();
        assert_eq!(campaign.start_date.as_deref(), Some("20250301"));
        assert_eq!(campaign.end_date.as_deref(), Some("20250630"));
    }

    #[test]
    fn create_rejects_malformed_dates() {
        let err = build_create(
            "campaign_create",
            &cid(),
            &json!({"name": "X", "budget_id": 1, "start_date": "March 1st"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("start_date"));
    }

    // -- Update operations --

    #[test]
    fn update_mask_covers_only_supplied_fields() {
        let op = build_update(
            "campaign_update",
            &cid(),
            &json!({"campaign_id": 7, "status": "ENABLED"}),
        )
        .unwrap();

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["updateMask"], "status");
        assert_eq!(value["update"]["status"], "ENABLED");
        assert_eq!(
            value["update"]["resourceName"],
            "customers/1234567890/campaigns/7"
        );
    }

    #[test]
    fn update_without_fields_is_rejected() {
        let err =
            build_update("campaign_update", &cid(), &json!({"campaign_id": 7})).unwrap_err();
        assert!(err.to_string().contains("no updatable fields"));
    }

    // -- Dispatch --

    #[tokio::test]
    async fn create_rejects_unknown_status_before_any_request() {
        let adapter = CampaignsAdapter::new(test_client());
        let err = adapter
            .execute_tool(
                "campaign_create",
                json!({
                    "customer_id": "1234567890",
                    "name": "X",
                    "budget_id": 1,
                    "status": "RUNNING"
                }),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("RUNNING"));
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let adapter = CampaignsAdapter::new(test_client());
        let err = adapter
            .execute_tool("campaign_pause_all", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    }
}
