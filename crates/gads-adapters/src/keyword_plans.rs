//! Keyword planning tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::request::{GenerateKeywordIdeasRequest, KeywordAndUrlSeed, KeywordSeed, UrlSeed};
use gads_api::resources::{KeywordPlan, KeywordPlanForecastPeriod};
use gads_api::{GoogleAdsClient, MutateRequest, Operation};
use gads_core::enums::{ForecastInterval, KeywordPlanNetwork};

use crate::error::{AdapterError, Result};
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "keywordPlans";

/// The reach planner caps idea pages at 10k rows per request.
const MAX_IDEAS_PAGE: i64 = 10_000;

/// Adapter for keyword plans and keyword idea generation.
pub struct KeywordPlansAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl KeywordPlansAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "keyword_plans".to_string(),
            client,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_plan_create(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "keyword_plan_create";
        let customer = params::customer_id(&params, TOOL)?;
        let (partial_failure, validate_only) = params::mutate_flags(&params);
        let plan = build_plan(TOOL, &params)?;

        debug!(customer_id = %customer, "Creating keyword plan");

        let request = MutateRequest::new(vec![Operation::create(plan)])
            .partial_failure(partial_failure)
            .validate_only(validate_only);
        let response = self.client.mutate(&customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    async fn tool_ideas_generate(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "keyword_ideas_generate";
        let customer = params::customer_id(&params, TOOL)?;
        let request = build_ideas_request(TOOL, &params)?;

        debug!(customer_id = %customer, "Generating keyword ideas");

        let response = self
            .client
            .generate_keyword_ideas(&customer, &request)
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn build_plan(tool: &str, params: &Value) -> Result<KeywordPlan> {
    let name = params::required_str(params, tool, "name")?;
    let interval = params::enum_or(params, tool, "forecast_interval", ForecastInterval::NextQuarter)?;

    Ok(KeywordPlan {
        name: Some(name.to_string()),
        forecast_period: Some(KeywordPlanForecastPeriod {
            date_interval: Some(interval),
        }),
        ..KeywordPlan::default()
    })
}

fn seed_keywords(tool: &str, params: &Value) -> Result<Vec<String>> {
    match params.get("keywords") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    AdapterError::invalid_params(tool, "'keywords' entries must be strings")
                })
            })
            .collect(),
        Some(_) => Err(AdapterError::invalid_params(
            tool,
            "'keywords' must be an array",
        )),
    }
}

fn geo_constant_names(tool: &str, params: &Value) -> Result<Vec<String>> {
    match params.get("geo_target_ids") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) if items.is_empty() => Ok(Vec::new()),
        Some(Value::Array(_)) => Ok(params::required_id_array(params, tool, "geo_target_ids")?
            .into_iter()
            .map(|id| format!("geoTargetConstants/{id}"))
            .collect()),
        Some(_) => Err(AdapterError::invalid_params(
            tool,
            "'geo_target_ids' must be an array",
        )),
    }
}

/// Seed selection mirrors the API's oneof: keywords and a page URL
/// together form a combined seed, either alone forms its own.
fn build_ideas_request(tool: &str, params: &Value) -> Result<GenerateKeywordIdeasRequest> {
    let keywords = seed_keywords(tool, params)?;
    let url = params::optional_string(params, "page_url");

    let (keyword_seed, url_seed, keyword_and_url_seed) = match (keywords.is_empty(), url) {
        (false, Some(url)) => (None, None, Some(KeywordAndUrlSeed { keywords, url })),
        (false, None) => (Some(KeywordSeed { keywords }), None, None),
        (true, Some(url)) => (None, Some(UrlSeed { url }), None),
        (true, None) => {
            return Err(AdapterError::invalid_params(
                tool,
                "provide 'keywords', 'page_url', or both",
            ));
        }
    };

    let language_id = params::optional_i64(params, tool, "language_id")?.unwrap_or(1000);
    let page_size = match params::optional_i64(params, tool, "limit")? {
        Some(n) if n <= 0 => {
            return Err(AdapterError::invalid_params(tool, "'limit' must be positive"));
        }
        Some(n) => Some(n.min(MAX_IDEAS_PAGE) as i32),
        None => None,
    };
    let network = params::enum_or(
        params,
        tool,
        "network",
        KeywordPlanNetwork::GoogleSearchAndPartners,
    )?;

    Ok(GenerateKeywordIdeasRequest {
        language: Some(format!("languageConstants/{language_id}")),
        geo_target_constants: geo_constant_names(tool, params)?,
        page_size,
        keyword_plan_network: Some(network),
        keyword_seed,
        url_seed,
        keyword_and_url_seed,
    })
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "keyword_plan_create",
            "Create a keyword plan for forecasting",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "name": {"type": "string", "description": "Plan name"},
                    "forecast_interval": {"type": "string", "enum": ForecastInterval::wire_names(), "description": "Forecast window, default NEXT_QUARTER"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "name"]
            }),
        ),
        ToolDefinition::new(
            "keyword_ideas_generate",
            "Generate keyword ideas from seed keywords and/or a page URL",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "keywords": {
                        "type": "array",
                        "description": "Seed keywords",
                        "items": {"type": "string"}
                    },
                    "page_url": {"type": "string", "description": "Seed page URL"},
                    "language_id": {"type": ["integer", "string"], "description": "Language constant ID, default 1000 (English)"},
                    "geo_target_ids": {
                        "type": "array",
                        "description": "Geo target constant IDs to scope ideas to",
                        "items": {"type": ["integer", "string"]}
                    },
                    "network": {"type": "string", "enum": KeywordPlanNetwork::wire_names(), "description": "Network to source ideas from, default GOOGLE_SEARCH_AND_PARTNERS"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum ideas to return"}
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
impl Adapter for KeywordPlansAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Keyword plans and keyword idea generation"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "keyword_plan_create" => self.tool_plan_create(params).await,
            "keyword_ideas_generate" => self.tool_ideas_generate(params).await,
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
