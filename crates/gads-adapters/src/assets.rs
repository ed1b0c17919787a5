//! Asset tools: text, image, and YouTube video assets.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use tracing::debug;

use gads_api::resources::{Asset, ImageAsset, TextAsset, YoutubeVideoAsset};
use gads_api::{GoogleAdsClient, MutateRequest, Operation, SearchRequest};
use gads_core::enums::AssetType;
use gads_core::CustomerId;

use crate::error::{AdapterError, Result};
use crate::gaql::GaqlQuery;
use crate::params;
use crate::traits::{Adapter, ToolDefinition, settle_mutate};

const COLLECTION: &str = "assets";

/// Adapter for assets.
pub struct AssetsAdapter {
    id: String,
    client: Arc<GoogleAdsClient>,
}

impl AssetsAdapter {
    pub fn new(client: Arc<GoogleAdsClient>) -> Self {
        Self {
            id: "assets".to_string(),
            client,
        }
    }

    async fn mutate_create(&self, customer: &CustomerId, params: &Value, asset: Asset) -> Result<Value> {
        let (partial_failure, validate_only) = params::mutate_flags(params);
        let request = MutateRequest::new(vec![Operation::create(asset)])
            .partial_failure(partial_failure)
            .validate_only(validate_only);

        let response = self.client.mutate(customer, COLLECTION, &request).await?;
        settle_mutate(response, partial_failure)
    }

    // -- Tool implementations -----------------------------------------------

    async fn tool_create_text(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_create_text";
        let customer = params::customer_id(&params, TOOL)?;
        let asset = build_text_asset(TOOL, &params)?;

        debug!(customer_id = %customer, name = asset.name.as_deref(), "Creating text asset");
        self.mutate_create(&customer, &params, asset).await
    }

    async fn tool_create_image(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_create_image";
        let customer = params::customer_id(&params, TOOL)?;
        let asset = build_image_asset(TOOL, &params)?;

        debug!(customer_id = %customer, name = asset.name.as_deref(), "Creating image asset");
        self.mutate_create(&customer, &params, asset).await
    }

    async fn tool_create_youtube_video(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_create_youtube_video";
        let customer = params::customer_id(&params, TOOL)?;
        let asset = build_youtube_asset(TOOL, &params)?;

        debug!(customer_id = %customer, name = asset.name.as_deref(), "Creating YouTube video asset");
        self.mutate_create(&customer, &params, asset).await
    }

    async fn tool_list(&self, params: Value) -> Result<Value> {
        const TOOL: &str = "asset_list";
        let customer = params::customer_id(&params, TOOL)?;
        let asset_type: Option<AssetType> = params::parse_enum(&params, TOOL, "asset_type")?;
        let limit = params::limit_or(&params, TOOL, 50)?;

        let mut query = GaqlQuery::select(
            &[
                "asset.id",
                "asset.name",
                "asset.type",
                "asset.text_asset.text",
                "asset.youtube_video_asset.youtube_video_id",
            ],
            "asset",
        );
        if let Some(asset_type) = asset_type {
            query = query.and_where(format!("asset.type = '{asset_type}'"));
        }
        let query = query.order_by("asset.id").limit(limit).build();

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

/// Default name for a text asset: `Text: ` plus the first 50 characters.
fn default_text_name(text: &str) -> String {
    let prefix: String = text.chars().take(50).collect();
    format!("Text: {prefix}")
}

fn build_text_asset(tool: &str, params: &Value) -> Result<Asset> {
    let text = params::required_str(params, tool, "text")?;
    let name = params::optional_string(params, "name").unwrap_or_else(|| default_text_name(text));

    Ok(Asset {
        name: Some(name),
        text_asset: Some(TextAsset {
            text: Some(text.to_string()),
        }),
        ..Default::default()
    })
}

fn build_image_asset(tool: &str, params: &Value) -> Result<Asset> {
    let data = params::required_str(params, tool, "image_data")?;
    let name = params::required_str(params, tool, "name")?;
    let mime_type =
        params::optional_string(params, "mime_type").unwrap_or_else(|| "IMAGE_JPEG".to_string());

    // The API wants the base64 text verbatim; decoding here just catches
    // garbage before it ships.
    BASE64
        .decode(data)
        .map_err(|_| AdapterError::invalid_params(tool, "'image_data' is not valid base64"))?;

    Ok(Asset {
        name: Some(name.to_string()),
        image_asset: Some(ImageAsset {
            data: Some(data.to_string()),
            mime_type: Some(mime_type),
        }),
        ..Default::default()
    })
}

fn build_youtube_asset(tool: &str, params: &Value) -> Result<Asset> {
    let video_id = params::required_str(params, tool, "youtube_video_id")?;
    let name = params::optional_string(params, "name")
        .unwrap_or_else(|| format!("YouTube Video: {video_id}"));

    Ok(Asset {
        name: Some(name),
        youtube_video_asset: Some(YoutubeVideoAsset {
            youtube_video_id: Some(video_id.to_string()),
        }),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "asset_create_text",
            "Create a text asset",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "text": {"type": "string", "description": "The text content"},
                    "name": {"type": "string", "description": "Asset name; defaults to 'Text: ' plus the first 50 characters"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "text"]
            }),
        ),
        ToolDefinition::new(
            "asset_create_image",
            "Create an image asset from base64-encoded bytes",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "image_data": {"type": "string", "description": "Base64-encoded image bytes"},
                    "name": {"type": "string", "description": "Asset name"},
                    "mime_type": {"type": "string", "enum": ["IMAGE_JPEG", "IMAGE_PNG", "IMAGE_GIF"], "description": "Image format, default IMAGE_JPEG"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "image_data", "name"]
            }),
        ),
        ToolDefinition::new(
            "asset_create_youtube_video",
            "Create a YouTube video asset",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "youtube_video_id": {"type": "string", "description": "YouTube video ID (the watch URL suffix)"},
                    "name": {"type": "string", "description": "Asset name; defaults to 'YouTube Video: ' plus the video ID"},
                    "partial_failure": {"type": "boolean", "description": "Apply valid operations even if others fail"},
                    "validate_only": {"type": "boolean", "description": "Validate without executing"}
                },
                "required": ["customer_id", "youtube_video_id"]
            }),
        ),
        ToolDefinition::new(
            "asset_list",
            "List assets, optionally filtered by type",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {"type": "string", "description": "Customer ID, dashed or bare"},
                    "asset_type": {"type": "string", "enum": AssetType::wire_names(), "description": "Only assets of this type"},
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
impl Adapter for AssetsAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Creative asset management"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "asset_create_text" => self.tool_create_text(params).await,
            "asset_create_image" => self.tool_create_image(params).await,
            "asset_create_youtube_video" => self.tool_create_youtube_video(params).await,
            "asset_list" => self.tool_list(params).await,
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
