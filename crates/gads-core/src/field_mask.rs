//! Update field masks.
//!
//! Every update mutate carries a mask listing exactly the fields being
//! changed. The mask is built incrementally as optional inputs are
//! inspected, so omitted inputs never appear in it and the API never
//! clears a field the caller did not touch.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, duplicate-free list of dotted field paths.
///
/// Serializes to the REST wire form: a single comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already present.
    pub fn push(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if !self.paths.iter().any(|p| *p == path) {
            self.paths.push(path);
        }
        self
    }

    /// Append `path` only when `value` is supplied.
    ///
    /// This is the builder every update tool uses: one `maybe` per optional
    /// input keeps the mask minimal by construction.
    pub fn maybe<T>(&mut self, path: &str, value: &Option<T>) -> &mut Self {
        if value.is_some() {
            self.push(path);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// The paths in insertion order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The comma-joined wire form, e.g. `"name,amount_micros"`.
    pub fn to_wire(&self) -> String {
        self.paths.join(",")
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut mask = Self::new();
        for path in iter {
            mask.push(path);
        }
        mask
    }
}

impl Serialize for FieldMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for FieldMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(Self::new());
        }
        raw.split(',')
            .map(|p| {
                let p = p.trim();
                if p.is_empty() {
                    Err(D::Error::custom("empty path in field mask"))
                } else {
                    Ok(p.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|paths| paths.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut mask = FieldMask::new();
        mask.push("name").push("status").push("amount_micros");
        assert_eq!(mask.paths(), ["name", "status", "amount_micros"]);
        assert_eq!(mask.to_wire(), "name,status,amount_micros");
    }

    #[test]
    fn deduplicates() {
        let mut mask = FieldMask::new();
        mask.push("name").push("name").push("status").push("name");
        assert_eq!(mask.paths(), ["name", "status"]);
    }

    #[test]
    fn maybe_tracks_supplied_options() {
        let name: Option<&str> = Some("spring sale");
        let amount: Option<i64> = None;
        let shared: Option<bool> = Some(false);

        let mut mask = FieldMask::new();
        mask.maybe("name", &name)
            .maybe("amount_micros", &amount)
            .maybe("explicitly_shared", &shared);

        // Only the supplied subset appears, in inspection order.
        assert_eq!(mask.paths(), ["name", "explicitly_shared"]);
    }

    #[test]
    fn single_field_update() {
        let amount: Option<i64> = Some(5_000_000);
        let name: Option<&str> = None;

        let mut mask = FieldMask::new();
        mask.maybe("amount_micros", &amount).maybe("name", &name);

        assert_eq!(mask.paths(), ["amount_micros"]);
        assert_eq!(mask.to_wire(), "amount_micros");
    }

    #[test]
    fn dotted_paths_pass_through() {
        let mut mask = FieldMask::new();
        mask.push("network_settings.target_google_search");
        assert_eq!(mask.to_wire(), "network_settings.target_google_search");
    }

    #[test]
    fn serde_round_trip() {
        let mask: FieldMask = ["name", "status"].into_iter().collect();
        let json = serde_json::to_value(&mask).unwrap();
        assert_eq!(json, serde_json::json!("name,status"));

        let back: FieldMask = serde_json::from_value(json).unwrap();
        assert_eq!(back, mask);
    }

    #[test]
    fn empty_mask_serializes_to_empty_string() {
        let mask = FieldMask::new();
        assert!(mask.is_empty());
        assert_eq!(serde_json::to_value(&mask).unwrap(), serde_json::json!(""));
    }
}
