//! Domain primitives for the Google Ads MCP server.
//!
//! This crate holds the pure, transport-free building blocks the rest of
//! the workspace is assembled from:
//!
//! - **[`customer`]** -- Customer ID normalization (dashed or bare input,
//!   canonical bare-digit output).
//! - **[`resource`]** -- Resource name construction, including the
//!   `~`-delimited composite names of association resources.
//! - **[`field_mask`]** -- Minimal update masks built from supplied inputs.
//! - **[`enums`]** -- Closed wire enums with exact round-trip parsing.
//! - **[`micros`]** -- Serde helpers for int64-as-string wire fields.
//! - **[`registry`]** -- Concurrent adapter registry backed by `DashMap`.
//! - **[`error`]** -- Unified error type built with `thiserror`.
//!
//! All public types are `Send + Sync` and carry no I/O.

pub mod customer;
pub mod enums;
pub mod error;
pub mod field_mask;
pub mod micros;
pub mod registry;
pub mod resource;

// Re-export the most commonly used types at the crate root for convenience.
pub use customer::CustomerId;
pub use error::{CoreError, Result};
pub use field_mask::FieldMask;
pub use registry::{AdapterInfo, AdapterRegistry};
pub use resource::ResourceName;
