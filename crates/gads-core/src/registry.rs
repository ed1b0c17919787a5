//! Adapter registry.
//!
//! The registry tracks every resource adapter mounted into the server: its
//! identifier, description, and how many tools it contributes. Adapters are
//! stateless, so there is no connection lifecycle to track; the registry
//! exists to back the status surfaces (the `/api/adapters` endpoint and the
//! `tools` subcommand).
//!
//! Internally it is backed by [`DashMap`], which provides lock-free
//! concurrent reads without a global `RwLock`, and is cheaply cloneable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Metadata about a mounted adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Unique identifier (e.g. "budgets", "campaigns").
    pub id: String,
    /// Short description shown on status surfaces.
    pub description: String,
    /// Number of tools the adapter exposes.
    pub tool_count: usize,
    /// When the adapter was mounted.
    pub registered_at: DateTime<Utc>,
}

/// Live index of mounted adapters, cheap to clone and share.
#[derive(Clone)]
pub struct AdapterRegistry {
    inner: Arc<DashMap<String, AdapterInfo>>,
}

impl AdapterRegistry {
    /// Start with no adapters mounted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Register an adapter.
    ///
    /// Registering an `id` twice replaces the earlier entry.
    pub fn register(
        &self,
        id: impl Into<String>,
        description: impl Into<String>,
        tool_count: usize,
    ) {
        let id = id.into();
        let description = description.into();

        tracing::info!(adapter_id = %id, tool_count, "adapter registered");

        self.inner.insert(
            id.clone(),
            AdapterInfo {
                id,
                description,
                tool_count,
                registered_at: Utc::now(),
            },
        );
    }

    /// Look up one adapter's metadata by id.
    pub fn get(&self, id: &str) -> Result<AdapterInfo> {
        self.inner
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CoreError::AdapterNotFound {
                adapter_id: id.to_string(),
            })
    }

    /// Whether an adapter with this ID is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains_key(id)
    }

    /// All registered adapter IDs, sorted for stable output.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Snapshot of all registered adapters, sorted by ID.
    pub fn list_all(&self) -> Vec<AdapterInfo> {
        let mut all: Vec<AdapterInfo> = self.inner.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Number of registered adapters.
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// Total number of tools across all registered adapters.
    pub fn total_tools(&self) -> usize {
        self.inner.iter().map(|e| e.value().tool_count).sum()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounted_adapter_is_retrievable() {
        let registry = AdapterRegistry::new();
        registry.register("budgets", "Campaign budget tools", 3);

        let info = registry.get("budgets").expect("adapter should exist");
        assert_eq!(info.id, "budgets");
        assert_eq!(info.tool_count, 3);
    }

    #[test]
    fn lookup_of_unmounted_adapter_fails() {
        let registry = AdapterRegistry::new();
        let missing = registry.get("gone");
        assert!(matches!(missing, Err(CoreError::AdapterNotFound { .. })));
    }

    #[test]
    fn reregistering_overwrites() {
        let registry = AdapterRegistry::new();
        registry.register("search", "Search tools", 2);
        registry.register("search", "Search and reporting tools", 5);

        assert_eq!(registry.count(), 1);
        let info = registry.get("search").unwrap();
        assert_eq!(info.tool_count, 5);
        assert_eq!(info.description, "Search and reporting tools");
    }

    #[test]
    fn listing_is_sorted() {
        let registry = AdapterRegistry::new();
        registry.register("labels", "Labels", 4);
        registry.register("budgets", "Budgets", 3);
        registry.register("campaigns", "Campaigns", 3);

        assert_eq!(registry.list_ids(), ["budgets", "campaigns", "labels"]);
        let infos = registry.list_all();
        assert_eq!(infos[0].id, "budgets");
        assert_eq!(infos[2].id, "labels");
    }

    #[test]
    fn total_tools_sums_across_adapters() {
        let registry = AdapterRegistry::new();
        registry.register("a", "A", 3);
        registry.register("b", "B", 7);
        assert_eq!(registry.total_tools(), 10);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
    }
}
