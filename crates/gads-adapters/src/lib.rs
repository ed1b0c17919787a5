//! Google Ads resource adapters.
//!
//! Each module wraps one resource family of the Google Ads API and
//! exposes it as MCP tools through the [`Adapter`] trait: parameter
//! extraction and validation, request assembly, one API call, and the
//! response as plain JSON. Adapters are stateless besides the shared
//! [`GoogleAdsClient`](gads_api::GoogleAdsClient) handle, so one instance
//! serves concurrent calls.
//!
//! Tool names are globally unique and prefixed by resource
//! (`budget_create`, `keyword_add`, `search_query`, ...), which lets a
//! server dispatch on the tool name alone.

pub mod error;
pub mod gaql;
pub mod params;
pub mod traits;

pub mod ad_groups;
pub mod asset_group_assets;
pub mod assets;
pub mod budgets;
pub mod campaigns;
pub mod conversions;
pub mod customer_links;
pub mod customers;
pub mod keyword_plans;
pub mod keywords;
pub mod labels;
pub mod recommendations;
pub mod search;

pub use error::{AdapterError, ErrorKind, Result};
pub use traits::{Adapter, ToolDefinition, dispatch};

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------
