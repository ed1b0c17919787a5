//! Account discovery and client account creation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::GoogleAdsClient;
use gads_api::request::CreateCustomerClientRequest;
use gads_api::resources::Customer;

use crate::error::{AdapterError, Result};
use crate::params;
use crate::traits::{Adapter, ToolDefinition};

/// Adapter for customer accounts.
pub struct CustomersAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl CustomersAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "customers".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_list_accessible(&self) -> Result<Value> {
        let response = self.client.list_accessible_customers().await?;
        debug!(count = response.resource_names.len(), "Listed accessible customers");
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_create_client(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "customer_create_client";
        let manager = params::customer_id(&params, TOOL)?;
        let validate_only = params::bool_or(&params, "validate_only", false);
        let customer_client = build_customer(TOOL, &params)?;

        debug!(customer_id = %manager, "Creating client account");

        let request = CreateCustomerClientRequest {
            customer_client,
            validate_only,
        };
        let response = self.client.create_customer_client(&manager, &request).await?;
        Ok(serde_json::to_value(response)?)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn build_customer(tool: &str, params: &Value) -> Result<Customer> {
    let name = params::required_str(params, tool, "descriptive_name")?;
    let currency = params::optional_str(params, "currency_code").unwrap_or("USD");
    let time_zone = params::optional_str(params, "time_zone").unwrap_or("America/New_York");

    Ok(Customer {
        descriptive_name: Some(name.to_string()),
        currency_code: Some(currency.to_string()),
        time_zone: Some(time_zone.to_string()),
        ..Customer::default()
    })
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "customer_list_accessible",
            "List customer accounts the authenticated user can access",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        ToolDefinition::new(
            "customer_create_client",
            "Create a new client account under a manager account",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Manager account customer ID, dashed or bare"},
                    "descriptive_name": {"type": "string", "description": "Display name for the new account"},
                    "currency_code": {"type": "string", "description": "ISO 4217 currency, default USD"},
                    "time_zone": {"type": "string", "description": "IANA time zone, default America/New_York"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "descriptive_name"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Adapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Adapter for CustomersAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Account discovery and client account creation"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "customer_list_accessible" => self.tool_list_accessible().await,
            "customer_create_client" => self.tool_create_client(params).await,
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

    // -- Payload builders --

    #[test]
    fn new_account_gets_currency_and_time_zone_defaults() {
        let customer = build_customer(
            "customer_create_client",
            &json!({"descriptive_name": "Acme Retail"}),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "descriptiveName": "Acme Retail",
                "currencyCode": "USD",
                "timeZone": "America/New_York"
            })
        );
    }

    #[test]
    fn explicit_currency_and_time_zone_win() {
        let customer = build_customer(
            "customer_create_client",
            &json!({
                "descriptive_name": "Acme EU",
                "currency_code": "EUR",
                "time_zone": "Europe/Berlin"
            }),
        )
        .unwrap();
        assert_eq!(customer.currency_code.as_deref(), Some("EUR"));
        assert_eq!(customer.time_zone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn descriptive_name_is_required() {
        let err = build_customer("customer_create_client", &json!({})).unwrap_err();
        assert!(err.to_string().contains("'descriptive_name' is required"));
    }

    // -- Tool definitions --

    #[test]
    fn create_client_schema_requires_manager_and_name() {
        let defs = build_tool_definitions();
        let create = defs
            .iter()
            .find(|t| t.name == "customer_create_client")
            .unwrap();
        assert_eq!(
            create.input_schema["required"],
            json!(["customer_id", "descriptive_name"])
        );
    }

    // -- Dispatch --

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let adapter = CustomersAdapter::new(test_client());
        let err = adapter
            .execute_tool("customer_delete", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    }
}
