//! Serde helpers for int64 wire fields.
//!
//! The Google JSON mapping renders int64 as a decimal string (`"5000000"`),
//! while lenient producers emit a bare number. These helpers serialize
//! strictly as strings and deserialize from either form. They apply to
//! entity IDs and micros-denominated money fields alike.
//!
//! Usage on a struct field:
//!
//! ```ignore
//! #[serde(
//!     with = "gads_core::micros::i64_string_opt",
//!     default,
//!     skip_serializing_if = "Option::is_none"
//! )]
//! pub amount_micros: Option<i64>,
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum I64Wire {
    Number(i64),
    Text(String),
}

fn from_wire<E: serde::de::Error>(wire: I64Wire) -> Result<i64, E> {
    match wire {
        I64Wire::Number(n) => Ok(n),
        I64Wire::Text(s) => s
            .parse::<i64>()
            .map_err(|_| E::custom(format!("invalid int64 string `{s}`"))),
    }
}

/// `i64` as a decimal string on the wire.
pub mod i64_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        from_wire(I64Wire::deserialize(deserializer)?)
    }
}

/// `Option<i64>` as an optional decimal string on the wire.
pub mod i64_string_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        Option::<I64Wire>::deserialize(deserializer)?
            .map(from_wire)
            .transpose()
    }
}

/// Parse an int64 that may arrive as a JSON string or number.
///
/// Used at tool boundaries where micros amounts come straight out of a
/// `serde_json::Value`.
pub fn parse_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
