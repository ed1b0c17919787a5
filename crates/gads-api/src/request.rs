//! Request envelopes.
//!
//! One [`Operation`] type covers the create/update/remove triple every
//! mutate endpoint accepts, and one [`MutateRequest`] wraps the operation
//! list with the pass-through flags. The flags are forwarded untouched;
//! the API is the only judge of which combinations are valid.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use gads_core::enums::{KeywordPlanNetwork, ResponseContentType, SummaryRowSetting};
use gads_core::{FieldMask, ResourceName};

use crate::resources::{ClickConversion, Customer};

pub(crate) fn is_false(v: &bool) -> bool {
    !*v
}

/// A single mutate operation: exactly one of create, update, or remove.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<R> {
    /// Create a new resource from the payload.
    Create(R),
    /// Rewrite the masked fields of an existing resource. The payload must
    /// carry its `resource_name`; the mask lists exactly the fields to touch.
    Update {
        resource: R,
        update_mask: FieldMask,
    },
    /// Remove the resource with this name.
    Remove(ResourceName),
}

impl<R> Operation<R> {
    pub fn create(resource: R) -> Self {
        Self::Create(resource)
    }

    pub fn update(resource: R, update_mask: FieldMask) -> Self {
        Self::Update {
            resource,
            update_mask,
        }
    }

    pub fn remove(name: ResourceName) -> Self {
        Self::Remove(name)
    }
}

// The REST shape puts `updateMask` beside the payload key, not inside it,
// so this cannot be a derived externally-tagged enum.
impl<R: Serialize> Serialize for Operation<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Operation::Create(resource) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("create", resource)?;
                map.end()
            }
            Operation::Update {
                resource,
                update_mask,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("update", resource)?;
                map.serialize_entry("updateMask", update_mask)?;
                map.end()
            }
            Operation::Remove(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("remove", name)?;
                map.end()
            }
        }
    }
}

/// Request body for `customers/{cid}/{collection}:mutate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateRequest<R> {
    pub operations: Vec<Operation<R>>,
    #[serde(skip_serializing_if = "is_false")]
    pub partial_failure: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub validate_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_content_type: Option<ResponseContentType>,
}

impl<R> MutateRequest<R> {
    pub fn new(operations: Vec<Operation<R>>) -> Self {
        Self {
            operations,
            partial_failure: false,
            validate_only: false,
            response_content_type: None,
        }
    }

    pub fn partial_failure(mut self, on: bool) -> Self {
        self.partial_failure = on;
        self
    }

    pub fn validate_only(mut self, on: bool) -> Self {
        self.validate_only = on;
        self
    }

    pub fn response_content_type(mut self, rct: Option<ResponseContentType>) -> Self {
        self.response_content_type = rct;
        self
    }
}

/// Request body for the link services whose mutate verb takes a single
/// `operation` instead of an `operations` array.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateSingleRequest<R> {
    pub operation: Operation<R>,
    #[serde(skip_serializing_if = "is_false")]
    pub validate_only: bool,
}

impl<R> MutateSingleRequest<R> {
    pub fn new(operation: Operation<R>) -> Self {
        Self {
            operation,
            validate_only: false,
        }
    }

    pub fn validate_only(mut self, on: bool) -> Self {
        self.validate_only = on;
        self
    }
}

/// Request body for `customers/{cid}/googleAds:search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub validate_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_row_setting: Option<SummaryRowSetting>,
}

impl SearchRequest {
    /// Largest page the API will return.
    pub const MAX_PAGE_SIZE: i32 = 10_000;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_size: None,
            page_token: None,
            validate_only: false,
            summary_row_setting: None,
        }
    }

    /// Set the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(mut self, size: i32) -> Self {
        self.page_size = Some(size.clamp(1, Self::MAX_PAGE_SIZE));
        self
    }

    pub fn page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }

    pub fn validate_only(mut self, on: bool) -> Self {
        self.validate_only = on;
        self
    }

    pub fn summary_row_setting(mut self, setting: Option<SummaryRowSetting>) -> Self {
        self.summary_row_setting = setting;
        self
    }
}

/// Request body for `customers/{cid}/googleAds:searchStream`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStreamRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_row_setting: Option<SummaryRowSetting>,
}

impl SearchStreamRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            summary_row_setting: None,
        }
    }
}

/// Request body for `customers/{cid}:createCustomerClient`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerClientRequest {
    pub customer_client: Customer,
    #[serde(skip_serializing_if = "is_false")]
    pub validate_only: bool,
}

/// Request body for `customers/{cid}:uploadClickConversions`.
///
/// `partial_failure` is always serialized: the upload endpoint requires it
/// to be explicitly true.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadClickConversionsRequest {
    pub conversions: Vec<ClickConversion>,
    pub partial_failure: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub validate_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub debug_enabled: bool,
}

/// Seed keywords for idea generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSeed {
    pub keywords: Vec<String>,
}

/// Seed page URL for idea generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSeed {
    pub url: String,
}

/// Combined keyword and URL seed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAndUrlSeed {
    pub keywords: Vec<String>,
    pub url: String,
}

/// Request body for `customers/{cid}:generateKeywordIdeas`.
///
/// Exactly one of the three seed fields should be set; the tool layer
/// guarantees that.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeywordIdeasRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geo_target_constants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_plan_network: Option<KeywordPlanNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_seed: Option<KeywordSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_seed: Option<UrlSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_and_url_seed: Option<KeywordAndUrlSeed>,
}

/// One target of `recommendations:apply` or `recommendations:dismiss`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOperation {
    pub resource_name: ResourceName,
}

/// Request body for the recommendation custom verbs. Apply and dismiss
/// share one wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationActionRequest {
    pub operations: Vec<RecommendationOperation>,
    #[serde(skip_serializing_if = "is_false")]
    pub partial_failure: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
