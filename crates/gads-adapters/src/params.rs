//! Tool parameter extraction.
//!
//! Tools receive a raw `serde_json::Value`. These helpers do the field
//! probing once so every adapter reports missing or mistyped inputs with
//! the same error text. Integer fields accept both JSON numbers and the
//! quoted-string form the Google Ads API itself uses for int64.

use std::str::FromStr;

use gads_core::{CoreError, CustomerId};
use serde_json::Value;

use crate::error::{AdapterError, Result};

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

pub fn required_str<'a>(params: &'a Value, tool: &str, field: &str) -> Result<&'a str> {
    params
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| AdapterError::invalid_params(tool, format!("'{field}' is required")))
}

pub fn optional_str<'a>(params: &'a Value, field: &str) -> Option<&'a str> {
    params.get(field).and_then(|v| v.as_str())
}

pub fn optional_string(params: &Value, field: &str) -> Option<String> {
    optional_str(params, field).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Numbers and booleans
// ---------------------------------------------------------------------------

/// Read an int64 field that may arrive as a number or a quoted string.
pub fn optional_i64(params: &Value, tool: &str, field: &str) -> Result<Option<i64>> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
            AdapterError::invalid_params(tool, format!("'{field}' is not a valid integer"))
        }),
        Some(Value::String(s)) => s.parse::<i64>().map(Some).map_err(|_| {
            AdapterError::invalid_params(tool, format!("'{field}' is not a valid integer"))
        }),
        Some(_) => Err(AdapterError::invalid_params(
            tool,
            format!("'{field}' must be an integer"),
        )),
    }
}

pub fn required_i64(params: &Value, tool: &str, field: &str) -> Result<i64> {
    optional_i64(params, tool, field)?
        .ok_or_else(|| AdapterError::invalid_params(tool, format!("'{field}' is required")))
}

/// Read a float field that may arrive as a number or a quoted string.
pub fn optional_f64(params: &Value, tool: &str, field: &str) -> Result<Option<f64>> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
            AdapterError::invalid_params(tool, format!("'{field}' is not a valid number"))
        }),
        Some(Value::String(s)) => s.parse::<f64>().map(Some).map_err(|_| {
            AdapterError::invalid_params(tool, format!("'{field}' is not a valid number"))
        }),
        Some(_) => Err(AdapterError::invalid_params(
            tool,
            format!("'{field}' must be a number"),
        )),
    }
}

/// Strict optional boolean; present-but-not-boolean is an error.
pub fn optional_bool(params: &Value, tool: &str, field: &str) -> Result<Option<bool>> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(AdapterError::invalid_params(
            tool,
            format!("'{field}' must be a boolean"),
        )),
    }
}

pub fn bool_or(params: &Value, field: &str, default: bool) -> bool {
    params
        .get(field)
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

/// Row cap for listing tools, falling back to the tool's default.
pub fn limit_or(params: &Value, tool: &str, default: i64) -> Result<i64> {
    let limit = optional_i64(params, tool, "limit")?.unwrap_or(default);
    if limit <= 0 {
        return Err(AdapterError::invalid_params(tool, "'limit' must be positive"));
    }
    Ok(limit)
}

// ---------------------------------------------------------------------------
// Compound fields
// ---------------------------------------------------------------------------

pub fn required_array<'a>(params: &'a Value, tool: &str, field: &str) -> Result<&'a [Value]> {
    let items = params
        .get(field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| AdapterError::invalid_params(tool, format!("'{field}' is required")))?;
    if items.is_empty() {
        return Err(AdapterError::invalid_params(
            tool,
            format!("'{field}' must not be empty"),
        ));
    }
    Ok(items)
}

/// Array of int64 IDs, each accepted as number or quoted string.
pub fn required_id_array(params: &Value, tool: &str, field: &str) -> Result<Vec<i64>> {
    required_array(params, tool, field)?
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_i64().ok_or(()),
            Value::String(s) => s.parse::<i64>().map_err(|_| ()),
            _ => Err(()),
        })
        .collect::<std::result::Result<Vec<_>, ()>>()
        .map_err(|_| {
            AdapterError::invalid_params(tool, format!("'{field}' must contain integer IDs"))
        })
}

/// A resource ID that may arrive as a number or a quoted string, returned
/// in the decimal form resource names embed.
pub fn required_id(params: &Value, tool: &str, field: &str) -> Result<String> {
    Ok(required_i64(params, tool, field)?.to_string())
}

pub fn optional_id(params: &Value, tool: &str, field: &str) -> Result<Option<String>> {
    Ok(optional_i64(params, tool, field)?.map(|id| id.to_string()))
}

/// The mandatory `customer_id`, normalized (dashes stripped, digits checked).
pub fn customer_id(params: &Value, tool: &str) -> Result<CustomerId> {
    let raw = required_str(params, tool, "customer_id")?;
    CustomerId::new(raw).map_err(|e| AdapterError::invalid_params(tool, e.to_string()))
}

/// `(partial_failure, validate_only)`, both defaulting to false.
pub fn mutate_flags(params: &Value) -> (bool, bool) {
    (
        bool_or(params, "partial_failure", false),
        bool_or(params, "validate_only", false),
    )
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Parse an optional enum field by its wire name (exact match).
pub fn parse_enum<T>(params: &Value, tool: &str, field: &str) -> Result<Option<T>>
where
    T: FromStr<Err = CoreError>,
{
    match optional_str(params, field) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| AdapterError::invalid_params(tool, e.to_string())),
        None => Ok(None),
    }
}

/// Parse an optional enum field, substituting a default when absent.
pub fn enum_or<T>(params: &Value, tool: &str, field: &str, default: T) -> Result<T>
where
    T: FromStr<Err = CoreError>,
{
    Ok(parse_enum(params, tool, field)?.unwrap_or(default))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gads_core::enums::KeywordMatchType;
    use serde_json::json;

    // -- Strings --

    #[test]
    fn required_str_present_and_missing() {
        let params = json!({"name": "Spring Sale"});
        assert_eq!(required_str(&params, "t", "name").unwrap(), "Spring Sale");
        let err = required_str(&params, "t", "status").unwrap_err();
        assert!(err.to_string().contains("'status' is required"));
    }

    #[test]
    fn required_str_rejects_non_string() {
        let params = json!({"name": 7});
        assert!(required_str(&params, "t", "name").is_err());
    }

    // -- Numbers --

    #[test]
    fn optional_i64_accepts_number_and_string() {
        let params = json!({"a": 500000, "b": "2500000"});
        assert_eq!(optional_i64(&params, "t", "a").unwrap(), Some(500_000));
        assert_eq!(optional_i64(&params, "t", "b").unwrap(), Some(2_500_000));
        assert_eq!(optional_i64(&params, "t", "c").unwrap(), None);
    }

    #[test]
    fn optional_i64_rejects_garbage() {
        let params = json!({"a": "lots", "b": true});
        assert!(optional_i64(&params, "t", "a").is_err());
        assert!(optional_i64(&params, "t", "b").is_err());
    }

    #[test]
    fn limit_rejects_zero_and_negative() {
        assert!(limit_or(&json!({"limit": 0}), "t", 50).is_err());
        assert!(limit_or(&json!({"limit": -3}), "t", 50).is_err());
        assert_eq!(limit_or(&json!({}), "t", 50).unwrap(), 50);
        assert_eq!(limit_or(&json!({"limit": "200"}), "t", 50).unwrap(), 200);
    }

    // -- Arrays --

    #[test]
    fn required_array_rejects_empty() {
        let err = required_array(&json!({"ids": []}), "t", "ids").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn id_array_mixes_numbers_and_strings() {
        let params = json!({"ids": [1, "2", 3]});
        assert_eq!(required_id_array(&params, "t", "ids").unwrap(), vec![1, 2, 3]);
        assert!(required_id_array(&json!({"ids": [1, "x"]}), "t", "ids").is_err());
    }

    #[test]
    fn optional_f64_accepts_number_and_string() {
        let params = json!({"a": 29.99, "b": "15.5", "c": 3});
        assert_eq!(optional_f64(&params, "t", "a").unwrap(), Some(29.99));
        assert_eq!(optional_f64(&params, "t", "b").unwrap(), Some(15.5));
        assert_eq!(optional_f64(&params, "t", "c").unwrap(), Some(3.0));
        assert!(optional_f64(&json!({"a": []}), "t", "a").is_err());
    }

    #[test]
    fn strict_bool_rejects_strings() {
        assert_eq!(optional_bool(&json!({}), "t", "hidden").unwrap(), None);
        assert_eq!(
            optional_bool(&json!({"hidden": true}), "t", "hidden").unwrap(),
            Some(true)
        );
        assert!(optional_bool(&json!({"hidden": "yes"}), "t", "hidden").is_err());
    }

    #[test]
    fn ids_are_stringified() {
        assert_eq!(required_id(&json!({"id": 42}), "t", "id").unwrap(), "42");
        assert_eq!(required_id(&json!({"id": "42"}), "t", "id").unwrap(), "42");
        assert_eq!(optional_id(&json!({}), "t", "id").unwrap(), None);
    }

    // -- Customer IDs --

    #[test]
    fn customer_id_normalizes_dashes() {
        let id = customer_id(&json!({"customer_id": "123-456-7890"}), "t").unwrap();
        assert_eq!(id.as_str(), "1234567890");
    }

    #[test]
    fn customer_id_missing_is_invalid_params() {
        let err = customer_id(&json!({}), "budget_create").unwrap_err();
        assert!(matches!(err, AdapterError::InvalidParams { ref tool_name, .. } if tool_name == "budget_create"));
    }

    // -- Enums and flags --

    #[test]
    fn enum_or_defaults_and_rejects_unknown() {
        let got: KeywordMatchType =
            enum_or(&json!({}), "t", "match_type", KeywordMatchType::Broad).unwrap();
        assert_eq!(got, KeywordMatchType::Broad);

        let got: KeywordMatchType =
            enum_or(&json!({"match_type": "EXACT"}), "t", "match_type", KeywordMatchType::Broad)
                .unwrap();
        assert_eq!(got, KeywordMatchType::Exact);

        let err = enum_or(
            &json!({"match_type": "exact"}),
            "t",
            "match_type",
            KeywordMatchType::Broad,
        )
        .map(|_: KeywordMatchType| ())
        .unwrap_err();
        assert!(err.to_string().contains("exact"));
    }

    #[test]
    fn mutate_flags_default_false() {
        assert_eq!(mutate_flags(&json!({})), (false, false));
        assert_eq!(
            mutate_flags(&json!({"partial_failure": true, "validate_only": true})),
            (true, true)
        );
    }
}
