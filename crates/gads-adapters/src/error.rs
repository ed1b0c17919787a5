//! Adapter error types.

use gads_api::ApiError;
use gads_api::response::GoogleAdsFailure;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdapterError>;

/// Coarse classification of an adapter failure, carried alongside the
/// message so callers can branch without parsing error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The call never produced a usable API response (network, auth,
    /// or a whole-request rejection by the API).
    Transport,
    /// The tool inputs could not be turned into a valid request.
    Validation,
    /// The API applied some operations and rejected others.
    PartialFailure,
}

impl ErrorKind {
    /// Stable label, matching the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Validation => "validation",
            ErrorKind::PartialFailure => "partial_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AdapterError {
    // -- Dispatch errors ----------------------------------------------------
    /// The requested tool does not exist on this adapter.
    #[error("Tool not found: '{tool_name}' on adapter '{adapter_id}'")]
    ToolNotFound {
        adapter_id: String,
        tool_name: String,
    },

    /// The parameters supplied to a tool were missing or malformed.
    #[error("Invalid parameters for '{tool_name}': {reason}")]
    InvalidParams { tool_name: String, reason: String },

    // -- Execution errors ---------------------------------------------------
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A partial-failure response reached a caller that required every
    /// operation to succeed.
    #[error("Partial failure: {failure}")]
    PartialFailure { failure: GoogleAdsFailure },

    /// A step other than the API call itself went wrong.
    #[error("Failed to {action}: {detail}")]
    Failed { action: String, detail: String },

    /// Response or parameter JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdapterError {
    /// Shorthand for [`AdapterError::InvalidParams`].
    pub fn invalid_params(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        AdapterError::InvalidParams {
            tool_name: tool_name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`AdapterError::Failed`].
    pub fn failed(action: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        AdapterError::Failed {
            action: action.into(),
            detail: detail.to_string(),
        }
    }

    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::Api(_) | AdapterError::Failed { .. } => ErrorKind::Transport,
            AdapterError::PartialFailure { .. } => ErrorKind::PartialFailure,
            AdapterError::ToolNotFound { .. }
            | AdapterError::InvalidParams { .. }
            | AdapterError::Serialization(_) => ErrorKind::Validation,
        }
    }
}
