//! Ad group tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::AdGroup;
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::{AdGroupStatus, AdGroupType, ResponseContentType};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "adGroups";

/// Adapter for ad groups.
pub struct AdGroupsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl AdGroupsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "ad_groups".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "ad_group_create";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let response_content_type: Option<ResponseContentType> =
            params::parse_enum(&params, TOOL, "response_content_type")?;
        let ad_group = build_create(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, name = ad_group.name.as_deref(), "Creating ad group");

        let request = MutateRequest::new(vec![Operation::create(ad_group)])
            .partial_failure(partial_failure)
            .validate_only(validate_only)
            .response_content_type(response_content_type);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "ad_group_update";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating ad group");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "ad_group_list";
        let customer = params::customer_id(&params, TOOL)?;
        let campaign_id = params::optional_id(&params, TOOL, "campaign_id")?;
        let include_removed = params::bool_or(&params, "include_removed", false);
        let limit = params::limit_or(&params, TOOL, 50)?;

        let mut query = GaqlQuery::select(
            &[
                "ad_group.id",
                "ad_group.name",
                "ad_group.status",
                "ad_group.type",
                "ad_group.cpc_bid_micros",
                "campaign.id",
                "campaign.name",
            ],
            "ad_group",
        );
        if let Some(campaign_id) = campaign_id {
            query = query.and_where(format!("campaign.id = {campaign_id}"));
        }
        let query = query
            .and_where_if(!include_removed, "ad_group.status != 'REMOVED'")
            .order_by("ad_group.id")
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

fn build_create(tool: &str, customer: &CustomerId, params: &Value) -> Result<AdGroup> {
    let name = params::required_str(params, tool, "name")?;
    let campaign_id = params::required_id(params, tool, "campaign_id")?;
    let campaign = ResourceName::campaign(customer, &campaign_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let status = params::enum_or(params, tool, "status", AdGroupStatus::Enabled)?;
    let ad_group_type = params::enum_or(params, tool, "type", AdGroupType::SearchStandard)?;

    Ok(AdGroup {
        name: Some(name.to_string()),
        campaign: Some(campaign.into_string()),
        status: Some(status),
        ad_group_type: Some(ad_group_type),
        cpc_bid_micros: params::optional_i64(params, tool, "cpc_bid_micros")?,
        ..Default::default()
    })
}

fn build_update(tool: &str, customer: &CustomerId, params: &Value) -> Result<Operation<AdGroup>> {
    let ad_group_id = params::required_id(params, tool, "ad_group_id")?;
    let resource_name = ResourceName::ad_group(customer, &ad_group_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let ad_group = AdGroup {
        resource_name: Some(resource_name.into_string()),
        name: params::optional_string(params, "name"),
        status: params::parse_enum(params, tool, "status")?,
        cpc_bid_micros: params::optional_i64(params, tool, "cpc_bid_micros")?,
        ..Default::default()
    };

    let mut mask = FieldMask::new();
    mask.maybe("name", &ad_group.name)
        .maybe("status", &ad_group.status)
        .maybe("cpc_bid_micros", &ad_group.cpc_bid_micros);
    if mask.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            "no updatable fields were provided",
        ));
    }
    Ok(Operation::update(ad_group, mask))
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "ad_group_create",
            "Create an ad group inside a campaign",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "campaign_id": {"type": ["integer", "string"], "description": "Parent campaign ID"},
                    "name": {"type": "string", "description": "Ad group name"},
                    "status": {"type": "string", "enum": AdGroupStatus::wire_names(), "description": "Initial status, default ENABLED"},
                    "type": {"type": "string", "enum": AdGroupType::wire_names(), "description": "Ad group type, default SEARCH_STANDARD"},
                    "cpc_bid_micros": {"type": ["integer", "string"], "description": "Default CPC bid in micros"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"},
                    "response_content_type": {"type": "string", "enum": ResponseContentType::wire_names(), "description": "How much of the mutated resource to return"}
                },
                "required": ["customer_id", "campaign_id", "name"]
            }),
        ),
        ToolDefinition::new(
            "ad_group_update",
            "Update fields of an existing ad group",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "ad_group_id": {"type": ["integer", "string"], "description": "Ad group ID"},
                    "name": {"type": "string", "description": "New ad group name"},
                    "status": {"type": "string", "enum": AdGroupStatus::wire_names(), "description": "New status"},
                    "cpc_bid_micros": {"type": ["integer", "string"], "description": "New default CPC bid in micros"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "ad_group_id"]
            }),
        ),
        ToolDefinition::new(
            "ad_group_list",
            "List ad groups, optionally filtered to one campaign",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "campaign_id": {"type": ["integer", "string"], "description": "Only ad groups in this campaign"},
                    "include_removed": {"type": "boolean", "description": "Include removed ad groups, default false"},
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
impl Adapter for AdGroupsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Ad group management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "ad_group_create" => self.tool_create(params).await,
            "ad_group_update" => self.tool_update(params).await,
            "ad_group_list" => self.tool_list(params).await,
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
