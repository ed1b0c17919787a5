//! GAQL search tools.
//!
//! `search_query` and `search_stream` pass caller-written GAQL through to
//! the API untouched apart from an optional appended `LIMIT`. The canned
//! report tools assemble their own queries for the common "show me my
//! campaigns" questions so callers never have to write GAQL for those.
//!
//! The stream tool checks a shared cancel flag between batches and returns
//! whatever it has collected so far when the flag trips, marked truncated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use gads_api::request::SearchStreamRequest;
use gads_api::{GoogleAdsClient, SearchRequest};
use gads_core::enums::SummaryRowSetting;

use crate::error::{AdapterError, Result};
use crate::gaql::{self, GaqlQuery};
use crate::params;
use crate::traits::{Adapter, ToolDefinition};

/// Row count between stream progress log lines.
const PROGRESS_EVERY: usize = 10_000;

/// Adapter for GAQL queries and canned reports.
pub struct SearchAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
    cancel: Arc<AtomicBool>,
}

impl SearchAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self::with_cancel_flag(client, Arc::new(AtomicBool::new(false)))
    }

    /// Share a cancel flag owned by the caller, typically wired to a
    /// shutdown signal.
    pub fn with_cancel_flag(client: Arc<GoogleAdsClient>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            id: "search".to_string(),
            client,
            cancel,
        }
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_query(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "search_query";
        let customer = params::customer_id(&params, TOOL)?;
        let query = params::required_str(&params, TOOL, "query")?;
        let limit = params::optional_i64(&params, TOOL, "limit")?;
        let page_size = params::optional_i64(&params, TOOL, "page_size")?;
        let summary = params::parse_enum::<SummaryRowSetting>(&params, TOOL, "summary_row_setting")?;

        debug!(customer_id = %customer, "Running GAQL query");

        let mut request = SearchRequest::new(gaql::append_limit(query, limit))
            .page_token(params::optional_string(&params, "page_token"))
            .validate_only(params::bool_or(&params, "validate_only", false))
            .summary_row_setting(summary);
        if let Some(size) = page_size {
            request = request.page_size(size as i32);
        }

        let response = self.client.search(&customer, &request).await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_stream(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "search_stream";
        let customer = params::customer_id(&params, TOOL)?;
        let query = params::required_str(&params, TOOL, "query")?;
        let limit = params::optional_i64(&params, TOOL, "limit")?;

        debug!(customer_id = %customer, "Running GAQL stream");

        let request = SearchStreamRequest::new(gaql::append_limit(query, limit));
        let batches = self.client.search_stream(&customer, &request).await?;

        let mut rows: Vec<Value> = Vec::new();
        let mut request_id: Option<String> = None;
        let mut truncated = false;
        for batch in batches {
            if self.cancel.load(Ordering::Acquire) {
                warn!(
                    customer_id = %customer,
                    rows = rows.len(),
                    "Stream cancelled, returning partial results"
                );
                truncated = true;
                break;
            }
            if request_id.is_none() {
                request_id = batch.request_id.clone();
            }
            let before = rows.len();
            rows.extend(batch.results);
            if rows.len() / PROGRESS_EVERY > before / PROGRESS_EVERY {
                info!(customer_id = %customer, rows = rows.len(), "Stream progress");
            }
        }

        Ok(json!({
            "results": rows,
            "totalResults": rows.len(),
            "requestId": request_id,
            "truncated": truncated,
        }))
    }

    async fn tool_campaign_report(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "search_campaigns";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;
        let include_removed = params::bool_or(&params, "include_removed", false);

        let query = GaqlQuery::select(
            &[
                "campaign.id",
                "campaign.name",
                "campaign.status",
                "campaign.advertising_channel_type",
                "campaign_budget.amount_micros",
                "metrics.impressions",
                "metrics.clicks",
                "metrics.cost_micros",
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

    async fn tool_ad_group_report(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "search_ad_groups";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;
        let include_removed = params::bool_or(&params, "include_removed", false);
        let campaign_id = params::optional_i64(&params, TOOL, "campaign_id")?;

        let mut query = GaqlQuery::select(
            &[
                "ad_group.id",
                "ad_group.name",
                "ad_group.status",
                "ad_group.type",
                "campaign.id",
                "campaign.name",
                "metrics.impressions",
                "metrics.clicks",
            ],
            "ad_group",
        )
        .and_where_if(!include_removed, "ad_group.status != 'REMOVED'");
        if let Some(id) = campaign_id {
            query = query.and_where(format!("campaign.id = {id}"));
        }
        let query = query.order_by("ad_group.id").limit(limit).build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn tool_keyword_report(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "search_keywords";
        let customer = params::customer_id(&params, TOOL)?;
        let limit = params::limit_or(&params, TOOL, 50)?;
        let include_removed = params::bool_or(&params, "include_removed", false);
        let ad_group_id = params::optional_i64(&params, TOOL, "ad_group_id")?;

        let mut query = GaqlQuery::select(
            &[
                "ad_group_criterion.criterion_id",
                "ad_group_criterion.keyword.text",
                "ad_group_criterion.keyword.match_type",
                "ad_group_criterion.status",
                "ad_group.id",
                "campaign.id",
                "metrics.impressions",
                "metrics.clicks",
                "metrics.average_cpc",
            ],
            "keyword_view",
        )
        .and_where_if(!include_removed, "ad_group_criterion.status != 'REMOVED'");
        if let Some(id) = ad_group_id {
            query = query.and_where(format!("ad_group.id = {id}"));
        }
        let query = query.order_by("ad_group_criterion.criterion_id").limit(limit).build();

        let response = self
            .client
            .search(&customer, &SearchRequest::new(query))
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "search_query",
            "Run a GAQL query with paging",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "query": {"type": "string", "description": "GAQL query text"},
                    "limit": {"type": ["integer", "string"], "description": "Append LIMIT n to the query"},
                    "page_size": {"type": ["integer", "string"], "description": "Rows per page, up to 10000"},
                    "page_token": {"type": "string", "description": "Continuation token from a previous page"},
                    "summary_row_setting": {"type": "string", "enum": SummaryRowSetting::wire_names(), "description": "Whether to include a metrics summary row"},
                    "validate_only": {"type": "boolean", "description": "Validate the query without running it"}
                },
                "required": ["customer_id", "query"]
            }),
        ),
        ToolDefinition::new(
            "search_stream",
            "Run a GAQL query as a stream and collect all rows",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "query": {"type": "string", "description": "GAQL query text"},
                    "limit": {"type": ["integer", "string"], "description": "Append LIMIT n to the query"}
                },
                "required": ["customer_id", "query"]
            }),
        ),
        ToolDefinition::new(
            "search_campaigns",
            "Campaign overview report with core metrics",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "include_removed": {"type": "boolean", "description": "Include removed campaigns"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 50"}
                },
                "required": ["customer_id"]
            }),
        ),
        ToolDefinition::new(
            "search_ad_groups",
            "Ad group overview report, optionally scoped to one campaign",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "campaign_id": {"type": ["integer", "string"], "description": "Only ad groups in this campaign"},
                    "include_removed": {"type": "boolean", "description": "Include removed ad groups"},
                    "limit": {"type": ["integer", "string"], "description": "Maximum rows to return, default 50"}
                },
                "required": ["customer_id"]
            }),
        ),
        ToolDefinition::new(
            "search_keywords",
            "Keyword performance report, optionally scoped to one ad group",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "ad_group_id": {"type": ["integer", "string"], "description": "Only keywords in this ad group"},
                    "include_removed": {"type": "boolean", "description": "Include removed keywords"},
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
impl Adapter for SearchAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "GAQL queries, streaming reads, and canned reports"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "search_query" => self.tool_query(params).await,
            "search_stream" => self.tool_stream(params).await,
            "search_campaigns" => self.tool_campaign_report(params).await,
            "search_ad_groups" => self.tool_ad_group_report(params).await,
            "search_keywords" => self.tool_keyword_report(params).await,
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
