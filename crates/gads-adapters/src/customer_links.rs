//! Manager-client link tools.
//!
//! The same link is addressed from two sides. A client account accepts or
//! refuses an invitation through its `customerManagerLinks` collection; a
//! manager account hides or unhides a client through `customerClientLinks`,
//! which mutates one operation at a time.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::request::MutateSingleRequest;
use gads_api::resources::{CustomerClientLink, CustomerManagerLink};
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::ManagerLinkStatus;
use gads_core::{CustomerId, FieldMask, ResourceName};

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const MANAGER_LINKS: &str = "customerManagerLinks";
const CLIENT_LINKS: &str = "customerClientLinks";

/// Adapter for manager-client account links.
pub struct CustomerLinksAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl CustomerLinksAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "customer_links".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "customer_link_list";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let query = GaqlQuery::select(
            &[
                "customer_manager_link.resource_name",
                "customer_manager_link.manager_customer",
                "customer_manager_link.manager_link_id",
                "customer_manager_link.status",
            ],
            "customer_manager_link",
        )
        .limit(limit)
        .build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_update_manager_status(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "customer_link_update_manager_status";
        let client_account = params::customer_id(&params, TOOL)?;
        let validate_only = params::bool_or(&params, "validate_only", false);
        let link = build_manager_status_update(TOOL, &client_account, &params)?;

        debug!(
            customer_id = %client_account,
            status = ?link.status,
            "Updating manager link status"
        );

        let mut mask = FieldMask::new();
        mask.push("status");
        let request =
            MutateRequest::new(vec![Operation::update(link, mask)]).validate_only(validate_only);
        let response = self
            .client
            .mutate(&client_account, MANAGER_LINKS, &request)
            .await?;
        settle_mutate(response, false)
    }

    async fn tool_update_client_hidden(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "customer_link_update_client_hidden";
        let manager = params::customer_id(&params, TOOL)?;
        let validate_only = params::bool_or(&params, "validate_only", false);
        let link = build_client_hidden_update(TOOL, &manager, &params)?;

        debug!(customer_id = %manager, hidden = link.hidden, "Updating client link visibility");

        let mut mask = FieldMask::new();
        mask.push("hidden");
        let request =
            MutateSingleRequest::new(Operation::update(link, mask)).validate_only(validate_only);
        let response = self
            .client
            .mutate_single(&manager, CLIENT_LINKS, &request)
            .await?;
        settle_mutate(response, false)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A customer ID field other than the primary `customer_id`.
fn account_id(params: &Value, tool: &str, field: &str) -> Result<CustomerId> {
    let raw = params::required_str(params, tool, field)?;
    CustomerId::new(raw).map_err(|e| AdapterError::invalid_params(tool, e.to_string()))
}

fn build_manager_status_update(
    tool: &str,
    client_account: &CustomerId,
    params: &Value,
) -> Result<CustomerManagerLink> {
    let manager = account_id(params, tool, "manager_customer_id")?;
    let link_id = params::required_id(params, tool, "link_id")?;
    let status = params::parse_enum::<ManagerLinkStatus>(params, tool, "status")?
        .ok_or_else(|| AdapterError::invalid_params(tool, "'status' is required"))?;

    let name = ResourceName::customer_manager_link(client_account, &manager, &link_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    Ok(CustomerManagerLink {
        resource_name: Some(name.into_string()),
        status: Some(status),
    })
}

fn build_client_hidden_update(
    tool: &str,
    manager: &CustomerId,
    params: &Value,
) -> Result<CustomerClientLink> {
    let client_account = account_id(params, tool, "client_customer_id")?;
    let link_id = params::required_id(params, tool, "link_id")?;
    let hidden = params::optional_bool(params, tool, "hidden")?
        .ok_or_else(|| AdapterError::invalid_params(tool, "'hidden' is required"))?;

    let name = ResourceName::customer_client_link(manager, &client_account, &link_id)
        .map_err(|e| AdapterError::invalid_params(tool, e.to_string()))?;

    Ok(CustomerClientLink {
        resource_name: Some(name.into_string()),
        hidden: Some(hidden),
    })
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "customer_link_list",
            "List manager links visible to an account",
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
            "customer_link_update_manager_status",
            "Accept, refuse, or cancel a manager link from the client account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Client account customer ID, dashed or bare"},
                    "manager_customer_id": {"type": "string", "description": "Manager account customer ID"},
                    "link_id": {"type": ["integer", "string"], "description": "Manager link ID"},
                    "status": {"type": "string", "enum": ManagerLinkStatus::wire_names(), "description": "New link status"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "manager_customer_id", "link_id", "status"]
            }),
        ),
        ToolDefinition::new(
            "customer_link_update_client_hidden",
            "Hide or unhide a client link from the manager account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Manager account customer ID, dashed or bare"},
                    "client_customer_id": {"type": "string", "description": "Client account customer ID"},
                    "link_id": {"type": ["integer", "string"], "description": "Manager link ID"},
                    "hidden": {"type": "boolean", "description": "Whether the client is hidden"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "client_customer_id", "link_id", "hidden"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for CustomerLinksAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Manager-client account link management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "customer_link_list" => self.tool_list(params).await,
            "customer_link_update_manager_status" => {
                self.tool_update_manager_status(params).await
            }
            "customer_link_update_client_hidden" => self.tool_update_client_hidden(params).await,
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
