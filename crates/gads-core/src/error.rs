//! Core error types.
//!
//! All domain primitives in this crate surface errors through [`CoreError`].
//! Each variant carries enough context for callers to decide how to handle
//! the failure without inspecting opaque strings.

/// Unified error type for Google Ads domain primitives.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    // -- Identifier errors --------------------------------------------------
    /// The input did not normalize to a 1-10 digit customer ID.
    #[error("invalid customer ID `{input}`: {reason}")]
    InvalidCustomerId { input: String, reason: String },

    /// A resource-name component was empty or whitespace.
    #[error("empty `{component}` component in {collection} resource name")]
    EmptyResourceComponent {
        collection: &'static str,
        component: &'static str,
    },

    // -- Enum errors --------------------------------------------------------
    /// The supplied string does not name a variant of the wire enum.
    #[error("unknown {enum_name} value `{value}`")]
    UnknownEnumValue {
        enum_name: &'static str,
        value: String,
    },

    // -- Registry errors ----------------------------------------------------
    /// The requested adapter is not registered.
    #[error("adapter not found: {adapter_id}")]
    AdapterNotFound { adapter_id: String },
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
