//! Response envelopes and the structured failure detail.
//!
//! A partial-failure mutate is NOT an error: the response arrives with the
//! per-row detail in `partial_failure_error` and flows back to the caller
//! unmodified. [`MutateResponse::require_all_succeeded`] is the strict
//! helper for callers that want all-or-nothing semantics instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gads_core::micros;

/// A `google.rpc.Status` carried in `partialFailureError` or extracted from
/// an error body. `details` keeps the per-operation error objects exactly
/// as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsFailure {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
}

impl fmt::Display for GoogleAdsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// One mutate result. Results arrive in the order of the submitted
/// operations; a failed row under partial failure is an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResult {
    #[serde(default)]
    pub resource_name: String,
    /// Echoed resource when `MUTABLE_RESOURCE` was requested. The key
    /// varies by service (`campaign`, `campaignBudget`, ...), so the
    /// remainder of the object is kept as-is.
    #[serde(flatten)]
    pub resource: serde_json::Map<String, Value>,
}

/// Response body for `{collection}:mutate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    #[serde(default)]
    pub results: Vec<MutateResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_failure_error: Option<GoogleAdsFailure>,
}

impl MutateResponse {
    /// Error out when the response carries any failed rows.
    pub fn require_all_succeeded(self) -> Result<Self, GoogleAdsFailure> {
        match self.partial_failure_error {
            Some(failure) => Err(failure),
            None => Ok(self),
        }
    }
}

/// Response body for `googleAds:search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Rows as returned, each keyed by the selected resources.
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_results_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_row: Option<Value>,
}

/// One element of the `googleAds:searchStream` response array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStreamBatch {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_row: Option<Value>,
}

/// Response body for `customers:listAccessibleCustomers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccessibleCustomersResponse {
    #[serde(default)]
    pub resource_names: Vec<String>,
}

/// Response body for `customers/{cid}:createCustomerClient`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerClientResponse {
    #[serde(default)]
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_link: Option<String>,
}

/// Response body for `customers/{cid}:uploadClickConversions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadClickConversionsResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_failure_error: Option<GoogleAdsFailure>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub job_id: Option<i64>,
}

/// Response body for `customers/{cid}:generateKeywordIdeas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeywordIdeasResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_size: Option<i64>,
}

/// Standard Google error envelope: `{"error": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
