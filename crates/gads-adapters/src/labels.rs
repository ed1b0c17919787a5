//! Label tools.
//!
//! Besides creating and updating labels themselves, this adapter applies
//! them to campaigns and ad groups through the `campaignLabels` and
//! `adGroupLabels` link collections.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::{AdGroupLabel, CampaignLabel, Label, TextLabel};
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "labels";

/// Adapter for labels.
pub struct LabelsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl LabelsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "labels".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "label_create";
        let customer = params::customer_id(&params, TOOL)?;
        let name = params::required_str(&params, TOOL, "name")?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);

        debug!(customer_id = %customer, name, "Creating label");

        let label = Label {
            name: Some(name.to_string()),
            text_label: Some(TextLabel {
                background_color: params::optional_string(&params, "background_color"),
                description: params::optional_string(&params, "description"),
            }),
            ..Default::default()
        };
        let request = MutateRequest::new(vec![Operation::create(label)])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "label_update";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating label");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "label_list";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let query = GaqlQuery::select(
            &[
                "label.id",
                "label.name",
                "label.status",
                "label.text_label.background_color",
                "label.text_label.description",
            ],
            "label",
        )
        .order_by("label.id")
        .limit(limit)
        .build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_apply_to_campaigns(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "label_apply_to_campaigns";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operations = build_campaign_applications(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Applying label to campaigns");

        let request = MutateRequest::new(operations)
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self
            .client
            .mutate(&customer, "campaignLabels", &request)
            .await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_apply_to_ad_groups(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "label_apply_to_ad_groups";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operations = build_ad_group_applications(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Applying label to ad groups");

        let request = MutateRequest::new(operations)
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self
            .client
            .mutate(&customer, "adGroupLabels", &request)
            .await?;
        settle_mutate(response, partial_failure)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn build_update(tool: &str, customer: &CustomerId, params: &Value) -> Result<Operation<Label>> {
    let label_id = params::required_id(params, tool, "label_id")?;
    let resource_name = ResourceName::label(customer, &label_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let name = params::optional_string(params, "name");
    let background_color = params::optional_string(params, "background_color");
    let description = params::optional_string(params, "description");

    let mut mask = FieldMask::new();
    mask.maybe("name", &name)
        .maybe("text_label.background_color", &background_color)
        .maybe("text_label.description", &description);
    if mask.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            "no updatable fields were provided",
        ));
    }

    let text_label = if background_color.is_some() || description.is_some() {
        Some(TextLabel {
            background_color,
            description,
        })
    } else {
        None
    };
    let label = Label {
        resource_name: Some(resource_name.into_string()),
        name,
        text_label,
        ..Default::default()
    };
    Ok(Operation::update(label, mask))
}

fn build_campaign_applications(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<Operation<CampaignLabel>>> {
    let label_id = params::required_id(params, tool, "label_id")?;
    let label = ResourceName::label(customer, &label_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let campaign_ids = params::required_id_array(params, tool, "campaign_ids")?;

    campaign_ids
        .into_iter()
        .map(|campaign_id| {
            let campaign = ResourceName::campaign(customer, &campaign_id.to_string())
                .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
            Ok(Operation::create(CampaignLabel {
                campaign: Some(campaign.into_string()),
                label: Some(label.as_str().to_string()),
                ..Default::default()
            }))
        })
        .collect()
}

fn build_ad_group_applications(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<Operation<AdGroupLabel>>> {
    let label_id = params::required_id(params, tool, "label_id")?;
    let label = ResourceName::label(customer, &label_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let ad_group_ids = params::required_id_array(params, tool, "ad_group_ids")?;

    ad_group_ids
        .into_iter()
        .map(|ad_group_id| {
            let ad_group = ResourceName::ad_group(customer, &ad_group_id.to_string())
                .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
            Ok(Operation::create(AdGroupLabel {
                ad_group: Some(ad_group.into_string()),
                label: Some(label.as_str().to_string()),
                ..Default::default()
            }))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "label_create",
            "Create a label",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "name": {"type": "string", "description": "Label name"},
                    "description": {"type": "string", "description": "Label description"},
                    "background_color": {"type": "string", "description": "Background color as a hex string, e.g. #FF0000"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "name"]
            }),
        ),
        ToolDefinition::new(
            "label_update",
            "Update fields of an existing label",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "label_id": {"type": ["integer", "string"], "description": "Label ID"},
                    "name": {"type": "string", "description": "New label name"},
                    "description": {"type": "string", "description": "New description"},
                    "background_color": {"type": "string", "description": "New background color as a hex string"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "label_id"]
            }),
        ),
        ToolDefinition::new(
            "label_list",
            "List labels in an account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 50"}
                },
                "required": ["customer_id"]
            }),
        ),
        ToolDefinition::new(
            "label_apply_to_campaigns",
            "Apply one label to several campaigns",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "label_id": {"type": ["integer", "string"], "description": "Label ID"},
                    "campaign_ids": {
                        "type": "array",
                        "description": "Campaign IDs to label",
                        "items": {"type": ["integer", "string"]}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "label_id", "campaign_ids"]
            }),
        ),
        ToolDefinition::new(
            "label_apply_to_ad_groups",
            "Apply one label to several ad groups",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "label_id": {"type": ["integer", "string"], "description": "Label ID"},
                    "ad_group_ids": {
                        "type": "array",
                        "description": "Ad group IDs to label",
                        "items": {"type": ["integer", "string"]}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "label_id", "ad_group_ids"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for LabelsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Label management and application"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "label_create" => self.tool_create(params).await,
            "label_update" => self.tool_update(params).await,
            "label_list" => self.tool_list(params).await,
            "label_apply_to_campaigns" => self.tool_apply_to_campaigns(params).await,
            "label_apply_to_ad_groups" => self.tool_apply_to_ad_groups(params).await,
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
