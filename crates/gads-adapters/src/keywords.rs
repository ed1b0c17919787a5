//! Keyword criterion tools.
//!
//! Keywords are ad group criteria. Batch adds and removes submit one
//! operation per keyword in caller order, so results line up with inputs
//! index by index under partial failure.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::{AdGroupCriterion, KeywordInfo};
use gads_api::{GoogleAdsClient, MutateRequest, Operation};
use gads_core::enums::{CriterionStatus, KeywordMatchType, ResponseContentType};
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "adGroupCriteria";

/// Adapter for keyword criteria.
pub struct KeywordsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl KeywordsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "keywords".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_add(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "keyword_add";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let response_content_type: Option<ResponseContentType> =
            params::parse_enum(&params, TOOL, "response_content_type")?;
        let operations = build_add_operations(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Adding keywords");

        let request = MutateRequest::new(operations)
            .partial_failure(partial_failure)
            .validate_only(validate_only)
            .response_content_type(response_content_type);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_update_bid(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "keyword_update_bid";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operation = build_bid_update(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, "Updating keyword bid");

        let request = MutateRequest::new(vec![operation])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_remove(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "keyword_remove";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let operations = build_remove_operations(TOOL, &customer, &params)?;

        debug!(customer_id = %customer, count = operations.len(), "Removing keywords");

        let request = MutateRequest::new(operations)
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }
}

// ---------------------------------------------------------------------------
// Operation builders
// ---------------------------------------------------------------------------

/// One create operation per keyword, in caller order. Entries may be bare
/// strings or objects overriding the shared match type and bid.
fn build_add_operations(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<Operation<AdGroupCriterion>>> {
    let ad_group_id = params::required_id(params, tool, "ad_group_id")?;
    let ad_group = ResourceName::ad_group(customer, &ad_group_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
    let default_match = params::enum_or(params, tool, "match_type", KeywordMatchType::Broad)?;
    let default_bid = params::optional_i64(params, tool, "cpc_bid_micros")?;
    let status = params::enum_or(params, tool, "status", CriterionStatus::Enabled)?;

    let items = params::required_array(params, tool, "keywords")?;
    let mut operations = Vec::with_capacity(items.len());
    for item in items {
        let (text, match_type, bid) = match item {
            Value::String(text) => (text.clone(), default_match, default_bid),
            Value::Object(_) => {
                let text = item.get("text").and_then(|v| v.as_str()).ok_or_else(|| {
                    AdapterError::invalid_params(tool, "each keyword object needs a 'text' field")
                })?;
                let match_type =
                    params::parse_enum(item, tool, "match_type")?.unwrap_or(default_match);
                let bid = params::optional_i64(item, tool, "cpc_bid_micros")?.or(default_bid);
                (text.to_string(), match_type, bid)
            }
            _ => {
                return Err(AdapterError::invalid_params(
                    tool,
                    "'keywords' entries must be strings or objects",
                ));
            }
        };

        operations.push(Operation::create(AdGroupCriterion {
            ad_group: Some(ad_group.as_str().to_string()),
            status: Some(status),
            keyword: Some(KeywordInfo {
                text: Some(text),
                match_type: Some(match_type),
            }),
            cpc_bid_micros: bid,
            ..Default::default()
        }));
    }
    Ok(operations)
}

fn build_bid_update(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Operation<AdGroupCriterion>> {
    let ad_group_id = params::required_id(params, tool, "ad_group_id")?;
    let criterion_id = params::required_id(params, tool, "criterion_id")?;
    let cpc_bid_micros = params::required_i64(params, tool, "cpc_bid_micros")?;
    let resource_name = ResourceName::ad_group_criterion(customer, &ad_group_id, &criterion_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    let criterion = AdGroupCriterion {
        resource_name: Some(resource_name.into_string()),
        cpc_bid_micros: Some(cpc_bid_micros),
        ..Default::default()
    };
    let mut mask = FieldMask::new();
    mask.push("cpc_bid_micros");
    Ok(Operation::update(criterion, mask))
}

/// One remove operation per criterion ID, in caller order.
fn build_remove_operations(
    tool: &str,
    customer: &CustomerId,
    params: &Value,
) -> Result<Vec<Operation<AdGroupCriterion>>> {
    let ad_group_id = params::required_id(params, tool, "ad_group_id")?;
    let criterion_ids = params::required_id_array(params, tool, "criterion_ids")?;

    criterion_ids
        .into_iter()
        .map(|criterion_id| {
            let name = ResourceName::ad_group_criterion(
                customer,
                &ad_group_id,
                &criterion_id.to_string(),
            )
            .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;
            Ok(Operation::remove(name))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "keyword_add",
            "Add keywords to an ad group in one batch",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "ad_group_id": {"type": ["integer", "string"], "description": "Target ad group ID"},
                    "keywords": {
                        "type": "array",
                        "description": "Keywords to add; strings, or objects with text / match_type / cpc_bid_micros",
                        "items": {"type": ["string", "object"]}
                    },
                    "match_type": {"type": "string", "enum": KeywordMatchType::wire_names(), "description": "Match type for entries that do not set one, default BROAD"},
                    "cpc_bid_micros": {"type": ["integer", "string"], "description": "Bid for entries that do not set one"},
                    "status": {"type": "string", "enum": CriterionStatus::wire_names(), "description": "Initial status, default ENABLED"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"},
                    "response_content_type": {"type": "string", "enum": ResponseContentType::wire_names(), "description": "How much of the mutated resource to return"}
                },
                "required": ["customer_id", "ad_group_id", "keywords"]
            }),
        ),
        ToolDefinition::new(
            "keyword_update_bid",
            "Set the CPC bid of one keyword",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "ad_group_id": {"type": ["integer", "string"], "description": "Ad group ID"},
                    "criterion_id": {"type": ["integer", "string"], "description": "Criterion ID of the keyword"},
                    "cpc_bid_micros": {"type": ["integer", "string"], "description": "New bid in micros"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "ad_group_id", "criterion_id", "cpc_bid_micros"]
            }),
        ),
        ToolDefinition::new(
            "keyword_remove",
            "Remove keywords from an ad group in one batch",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "ad_group_id": {"type": ["integer", "string"], "description": "Ad group ID"},
                    "criterion_ids": {
                        "type": "array",
                        "description": "Criterion IDs of the keywords to remove",
                        "items": {"type": ["integer", "string"]}
                    },
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "ad_group_id", "criterion_ids"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for KeywordsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Keyword criterion management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "keyword_add" => self.tool_add(params).await,
            "keyword_update_bid" => self.tool_update_bid(params).await,
            "keyword_remove" => self.tool_remove(params).await,
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
