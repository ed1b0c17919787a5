//! Asset-to-asset-group link tools, used by Performance Max campaigns.
//!
//! The link has no ID of its own. Its resource name is the composite
//! `assetGroupAssets/{asset_group_id}~{asset_id}~{FIELD_TYPE}`, so every
//! tool here takes the same three coordinates.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::AssetGroupAsset;
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::{AssetFieldType, AssetLinkStatus};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "assetGroupAssets";

/// Adapter for asset group asset links.
pub struct AssetGroupAssetsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl AssetGroupAssetsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "asset_group_assets".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_group_asset_create";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let link = build_create(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Linking asset to asset group");

        let request = MutateRequest::new(vec![Operation::create(link)])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update_status(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_group_asset_update_status";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_status_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating asset group asset status");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_remove(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_group_asset_remove";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let name = composite_name(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, resource = %name, "Removing asset group asset link");

        let request: MutateRequest<AssetGroupAsset> =
            MutateRequest::new(vec![Operation::remove(name)])
                .partial_failure(partial_failure)
                .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_group_asset_list";
        let customer = params::customer_id(&params, TOOL)?;
        let asset_group_id = params::optional_id(&params, TOOL, "asset_group_id")?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let mut query = GaqlQuery::select(
            &[
                "asset_group_asset.resource_name",
                "asset_group_asset.asset_group",
                "asset_group_asset.asset",
                "asset_group_asset.field_type",
                "asset_group_asset.status",
            ],
            "asset_group_asset",
        );
        if let Some(asset_group_id) = asset_group_id {
            query = query.and_where(format!("asset_group.id = {asset_group_id}"));
        }
        let query = query.limit(limit).build();

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

/// The three coordinates every tool here shares.
fn link_coordinates(
    tool: &str,
    params: &Value,
) -> Result<(String, String, AssetFieldType)> {
    let asset_group_id = params::required_id(params, tool, "asset_group_id")?;
    let asset_id = params::required_id(params, tool, "asset_id")?;
    let field_type = params::parse_enum(params, tool, "field_type")?.ok_or_else(|| {
        AdapterError::invalid_params(tool, "'field_type' is required")
    })?;
    Ok((asset_group_id, asset_id, field_type))
}

fn composite_name(tool: &str, customer: &CustomerId, params: &Value) -> Result<ResourceName> {
    let (asset_group_id, asset_id, field_type) = link_coordinates(tool, params)?;
    ResourceName::asset_group_asset(customer, &asset_group_id, &asset_id, field_type)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))
}

fn build_create(tool: &str, customer: &CustomerId, params: &Value) -> Result<AssetGroupAsset> {
    let (asset_group_id, asset_id, field_type) = link_coordinates(tool, params)?;
    let asset_group = ResourceName::asset_group(customer, &asset_group_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let asset = ResourceName::asset(customer, &asset_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    Ok(AssetGroupAsset {
        asset_group: Some(asset_group.into_string()),
        asset: Some(asset.into_string()),
        field_type: Some(field_type),
        ..Default::default()
    })
}

fn build_status_update(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Operation<AssetGroupAsset>> {
    let name = composite_name(tool, customer, params)?;
    let status: AssetLinkStatus = params::parse_enum(params, tool, "status")?
        .ok_or_else(|| AdapterError::invalid_params(tool, "'status' is required"))?;

    let link = AssetGroupAsset {
        resource_name: Some(name.into_string()),
        status: Some(status),
        ..Default::default()
    };
    let mut mask = FieldMask::new();
    mask.push("status");
    Ok(Operation::update(link, mask))
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "asset_group_asset_create",
            "Link an existing asset to an asset group in a serving role",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "asset_group_id": {"type": ["integer", "string"], "description": "Asset group ID"},
                    "asset_id": {"type": ["integer", "string"], "description": "Asset ID"},
                    "field_type": {"type": "string", "enum": AssetFieldType::wire_names(), "description": "Serving role of the asset in the group"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "asset_group_id", "asset_id", "field_type"]
            }),
        ),
        ToolDefinition::new(
            "asset_group_asset_update_status",
            "Change the status of an asset-to-asset-group link",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "asset_group_id": {"type": ["integer", "string"], "description": "Asset group ID"},
                    "asset_id": {"type": ["integer", "string"], "description": "Asset ID"},
                    "field_type": {"type": "string", "enum": AssetFieldType::wire_names(), "description": "Serving role of the asset in the group"},
                    "status": {"type": "string", "enum": AssetLinkStatus::wire_names(), "description": "New link status"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "asset_group_id", "asset_id", "field_type", "status"]
            }),
        ),
        ToolDefinition::new(
            "asset_group_asset_remove",
            "Unlink an asset from an asset group",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "asset_group_id": {"type": ["integer", "string"], "description": "Asset group ID"},
                    "asset_id": {"type": ["integer", "string"], "description": "Asset ID"},
                    "field_type": {"type": "string", "enum": AssetFieldType::wire_names(), "description": "Serving role of the asset in the group"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "asset_group_id", "asset_id", "field_type"]
            }),
        ),
        ToolDefinition::new(
            "asset_group_asset_list",
            "List asset-to-asset-group links, optionally for one asset group",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "asset_group_id": {"type": ["integer", "string"], "description": "Only links in this asset group"},
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
impl Adapter for AssetGroupAssetsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Asset group asset link management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "asset_group_asset_create" => self.tool_create(params).await,
            "asset_group_asset_update_status" => self.tool_update_status(params).await,
            "asset_group_asset_remove" => self.tool_remove(params).await,
            "asset_group_asset_list" => self.tool_list(params).await,
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
