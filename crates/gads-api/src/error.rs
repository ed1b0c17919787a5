//! Transport error types.
//!
//! Every call through [`crate::client::GoogleAdsClient`] surfaces failures
//! as [`ApiError`]. A vendor rejection keeps its structured detail in the
//! [`Status`](ApiError::Status) variant; nothing is flattened into opaque
//! strings on the way up.

use crate::response::GoogleAdsFailure;

/// Unified error type for the Google Ads REST transport.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configuration is incomplete or malformed.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// Obtaining an access token failed.
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// The HTTP request never produced a response (DNS, TLS, timeout, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Google Ads API error: {message}")]
    Status {
        /// HTTP status code of the response.
        http_code: u16,
        /// Canonical status name, e.g. `INVALID_ARGUMENT`.
        status: String,
        /// Human-readable message from the error envelope.
        message: String,
        /// Structured failure detail, when the body carried one.
        failure: Option<GoogleAdsFailure>,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether retrying the identical call could plausibly succeed.
    ///
    /// The client itself never retries; this exists so callers can branch.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(e) => e.is_timeout() || e.is_connect(),
            ApiError::Status { http_code, .. } => {
                matches!(http_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Convenience alias used throughout the transport crate.
pub type Result<T> = std::result::Result<T, ApiError>;
