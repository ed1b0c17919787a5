//! Customer ID normalization.
//!
//! Google Ads customer IDs appear in two spellings: the dashed human form
//! (`123-456-7890`) and the bare digit form (`1234567890`) the API expects
//! in URL paths, headers, and resource names. [`CustomerId`] accepts either
//! and always stores the bare form, so every downstream consumer can rely
//! on a single canonical spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A normalized Google Ads customer ID: 1-10 ASCII digits, no dashes.
///
/// Normalization is idempotent; feeding the output back through
/// [`CustomerId::new`] yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse and normalize a customer ID.
    ///
    /// Dashes are stripped; the remainder must be 1-10 ASCII digits.
    pub fn new(input: &str) -> Result<Self> {
        let digits: String = input.chars().filter(|c| *c != '-').collect();

        if digits.is_empty() {
            return Err(CoreError::InvalidCustomerId {
                input: input.to_string(),
                reason: "no digits".to_string(),
            });
        }
        if digits.len() > 10 {
            return Err(CoreError::InvalidCustomerId {
                input: input.to_string(),
                reason: format!("{} digits, expected at most 10", digits.len()),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidCustomerId {
                input: input.to_string(),
                reason: "contains non-digit characters".to_string(),
            });
        }

        Ok(Self(digits))
    }

    /// The bare digit form used in URL paths and resource names.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `customers/{id}` resource name for this customer.
    pub fn resource_name(&self) -> String {
        format!("customers/{}", self.0)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CustomerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
