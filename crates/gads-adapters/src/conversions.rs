//! Conversion tools: conversion actions and offline click uploads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::request::UploadClickConversionsRequest;
use gads_api::resources::{ClickConversion, ConversionAction, ValueSettings};
use gads_api::{GoogleAdsClient, MutateRequest, Operation};
use gads_core::enums::{
    ConversionActionCategory, ConversionActionStatus, ConversionActionType,
};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "conversionActions";

/// Adapter for conversion tracking.
pub struct ConversionsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl ConversionsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "conversions".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_action_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "conversion_action_create";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let action = build_action_create(TOOL, &params)?;

        debug!(customer_id = %customer, name = action.name.as_deref(), "Creating conversion action");

        let request = MutateRequest::new(vec![Operation::create(action)])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_action_update(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "conversion_action_update";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_action_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating conversion action");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_upload_clicks(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "conversion_upload_clicks";
        let customer = params::customer_id(&params, TOOL)?;
        // The upload endpoint rejects partial_failure=false, so true is the
        // default here rather than the usual false.
        let partial_failure = params::bool_or(&params, "partial_failure", true);
        let validate_only = params::bool_or(&params, "validate_only", false);
        let conversions = build_click_conversions(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = conversions.len(), "Uploading click conversions");

        let request = UploadClickConversionsRequest {
            conversions,
            partial_failure,
            validate_only,
            debug_enabled: params::bool_or(&params, "debug_enabled", false),
        };

        let response = self
            .client
            .upload_click_conversions(&customer, &request)
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn build_value_settings(tool: &str, params: &Value) -> Result<Option<ValueSettings>> {
    let default_value = params::optional_f64(params, tool, "default_value")?;
    let default_currency_code = params::optional_string(params, "default_currency_code");
    let always_use_default_value =
        params::optional_bool(params, tool, "always_use_default_value")?;

    if default_value.is_none()
        && default_currency_code.is_none()
        && always_use_default_value.is_none()
    {
        return Ok(None);
    }
    Ok(Some(ValueSettings {
        default_value,
        default_currency_code,
        always_use_default_value,
    }))
}

fn build_action_create(tool: &str, params: &Value) -> Result<ConversionAction> {
    let name = params::required_str(params, tool, "name")?;
    let category =
        params::enum_or(params, tool, "category", ConversionActionCategory::Default)?;
    let action_type = params::enum_or(params, tool, "type", ConversionActionType::Webpage)?;
    let status = params::enum_or(params, tool, "status", ConversionActionStatus::Enabled)?;

    Ok(ConversionAction {
        name: Some(name.to_string()),
        category: Some(category),
        action_type: Some(action_type),
        status: Some(status),
        value_settings: build_value_settings(tool, params)?,
        ..Default::default()
    })
}

fn build_action_update(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Operation<ConversionAction>> {
    let action_id = params::required_id(params, tool, "conversion_action_id")?;
    let resource_name = ResourceName::conversion_action(customer, &action_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let action = ConversionAction {
        resource_name: Some(resource_name.into_string()),
        name: params::optional_string(params, "name"),
        category: params::parse_enum(params, tool, "category")?,
        status: params::parse_enum(params, tool, "status")?,
        value_settings: build_value_settings(tool, params)?,
        ..Default::default()
    };

    let mut mask = FieldMask::new();
    mask.maybe("name", &action.name)
        .maybe("category", &action.category)
        .maybe("status", &action.status);
    if let Some(settings) = &action.value_settings {
        mask.maybe("value_settings.default_value", &settings.default_value)
            .maybe(
                "value_settings.default_currency_code",
                &settings.default_currency_code,
            )
            .maybe(
                "value_settings.always_use_default_value",
                &settings.always_use_default_value,
            );
    }
    if mask.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            "no updatable fields were provided",
        ));
    }
    Ok(Operation::update(action, mask))
}

/// One conversion row per entry, in caller order.
fn build_click_conversions(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<ClickConversion>> {
    let items = params::required_array(params, tool, "conversions")?;

    items
        .iter()
        .map(|item| {
            let gclid = params::required_str(item, tool, "gclid")?;
            let action_id = params::required_id(item, tool, "conversion_action_id")?;
            let conversion_action = ResourceName::conversion_action(customer, &action_id)
                .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
            let date_time = params::required_str(item, tool, "conversion_date_time")?;

            Ok(ClickConversion {
                gclid: Some(gclid.to_string()),
                conversion_action: Some(conversion_action.into_string()),
                conversion_date_time: Some(date_time.to_string()),
                conversion_value: params::optional_f64(item, tool, "conversion_value")?,
                currency_code: params::optional_string(item, "currency_code"),
                order_id: params::optional_string(item, "order_id"),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "conversion_action_create",
            "Create a conversion action",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "name": {"type": "string", "description": "Conversion action name"},
                    "category": {"type": "string", "enum": ConversionActionCategory::wire_names(), "description": "Reporting category, default DEFAULT"},
                    "type": {"type": "string", "enum": ConversionActionType::wire_names(), "description": "Tracking type, default WEBPAGE"},
                    "status": {"type": "string", "enum": ConversionActionStatus::wire_names(), "description": "Initial status, default ENABLED"},
                    "default_value": {"type": ["number", "string"], "description": "Default value per conversion"},
                    "default_currency_code": {"type": "string", "description": "Currency of the default value, e.g. USD"},
                    "always_use_default_value": {"type": "boolean", "description": "Ignore per-conversion values"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "name"]
            }),
        ),
        ToolDefinition::new(
            "conversion_action_update",
            "Update fields of an existing conversion action",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "conversion_action_id": {"type": ["integer", "string"], "description": "Conversion action ID"},
                    "name": {"type": "string", "description": "New name"},
                    "category": {"type": "string", "enum": ConversionActionCategory::wire_names(), "description": "New reporting category"},
                    "status": {"type": "string", "enum": ConversionActionStatus::wire_names(), "description": "New status"},
                    "default_value": {"type": ["number", "string"], "description": "New default value per conversion"},
                    "default_currency_code": {"type": "string", "description": "New currency of the default value"},
                    "always_use_default_value": {"type": "boolean", "description": "Ignore per-conversion values"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "conversion_action_id"]
            }),
        ),
        ToolDefinition::new(
            "conversion_upload_clicks",
            "Upload offline click conversions by GCLID",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "conversions": {
                        "type": "array",
                        "description": "Rows with gclid, conversion_action_id, conversion_date_time ('yyyy-mm-dd hh:mm:ss+|-hh:mm'), and optional conversion_value / currency_code / order_id",
                        "items": {"type": "object"}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid rows even if others fail, default true (the endpoint requires it)"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"},
                    "debug_enabled": {"type": "boolean", "description": "Return verbose per-row diagnostics"}
                },
                "required": ["customer_id", "conversions"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for ConversionsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Conversion action and upload management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "conversion_action_create" => self.tool_action_create(params).await,
            "conversion_action_update" => self.tool_action_update(params).await,
            "conversion_upload_clicks" => self.tool_upload_clicks(params).await,
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
