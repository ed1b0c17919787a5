//! Google Ads REST transport.
//!
//! Everything needed to talk to the Google Ads API over REST:
//!
//! - **[`config`]** -- Credentials and connection settings from the
//!   environment, with an optional TOML fallback.
//! - **[`auth`]** -- OAuth 2.0 refresh-token grant with expiry-aware
//!   caching.
//! - **[`client`]** -- The shared [`client::GoogleAdsClient`]: mutate,
//!   search, searchStream, and the custom verbs.
//! - **[`request`]** / **[`response`]** -- Typed envelopes matching the
//!   REST wire shapes, including the create/update/remove [`request::Operation`]
//!   one-of and the partial-failure detail.
//! - **[`resources`]** -- Sparse mutable payloads for every wrapped
//!   resource.
//! - **[`error`]** -- [`error::ApiError`] with the structured vendor
//!   failure attached.
//!
//! The transport stays thin: no retries, no caching, no local validation
//! of flag combinations.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod resources;
pub mod response;

// Re-export the most commonly used types at the crate root for convenience.
pub use client::{API_VERSION, GoogleAdsClient};
pub use config::{Credentials, GoogleAdsConfig};
pub use error::{ApiError, Result};
pub use request::{MutateRequest, MutateSingleRequest, Operation, SearchRequest};
pub use response::{GoogleAdsFailure, MutateResponse, SearchResponse};
