//! Adapter group selection.
//!
//! Tools are mounted in named groups so an MCP client can run with a
//! trimmed catalogue (13 adapters is a lot of schema for an agent to
//! read). `core` is the everyday set; the other groups opt into the
//! specialist surfaces.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::warn;

use gads_adapters::Adapter;
use gads_adapters::ad_groups::AdGroupsAdapter;
use gads_adapters::asset_group_assets::AssetGroupAssetsAdapter;
use gads_adapters::assets::AssetsAdapter;
use gads_adapters::budgets::BudgetsAdapter;
use gads_adapters::campaigns::CampaignsAdapter;
use gads_adapters::conversions::ConversionsAdapter;
use gads_adapters::customer_links::CustomerLinksAdapter;
use gads_adapters::customers::CustomersAdapter;
use gads_adapters::keyword_plans::KeywordPlansAdapter;
use gads_adapters::keywords::KeywordsAdapter;
use gads_adapters::labels::LabelsAdapter;
use gads_adapters::recommendations::RecommendationsAdapter;
use gads_adapters::search::SearchAdapter;
use gads_api::GoogleAdsClient;

/// Adapter identifiers belonging to each named group.
const GROUPS: &[(&str, &[&str])] = &[
    (
        "core",
        &[
            "customers",
            "campaigns",
            "budgets",
            "ad_groups",
            "keywords",
            "search",
        ],
    ),
    ("assets", &["assets", "asset_group_assets"]),
    ("planning", &["keyword_plans", "recommendations"]),
    ("conversions", &["conversions"]),
    ("organization", &["labels"]),
    ("account", &["customer_links"]),
];

/// Expand group names into a deduplicated adapter ID list, preserving
/// first-mention order. Unknown group names are logged and skipped.
pub fn resolve_groups(groups: &[String]) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    for group in groups {
        let group = group.trim();
        if group == "all" {
            for (_, members) in GROUPS {
                push_unique(&mut ids, members);
            }
            continue;
        }
        match GROUPS.iter().find(|(name, _)| *name == group) {
            Some((_, members)) => push_unique(&mut ids, members),
            None => warn!(group = %group, "unknown adapter group, skipping"),
        }
    }
    ids
}

fn push_unique(ids: &mut Vec<&'static str>, members: &[&'static str]) {
    for id in members {
        if !ids.contains(id) {
            ids.push(id);
        }
    }
}

/// Construct the adapters for the requested groups.
///
/// The cancel flag is threaded into the search adapter so a shutdown
/// signal can cut long stream collections short.
pub fn build_adapters(
    client: &Arc<GoogleAdsClient>,
    groups: &[String],
    cancel: &Arc<AtomicBool>,
) -> Vec<Arc<dyn Adapter>> {
    resolve_groups(groups)
        .into_iter()
        .filter_map(|id| build_adapter(id, client, cancel))
        .collect()
}

fn build_adapter(
    id: &str,
    client: &Arc<GoogleAdsClient>,
    cancel: &Arc<AtomicBool>,
) -> Option<Arc<dyn Adapter>> {
    let client = Arc::clone(client);
    let adapter: Arc<dyn Adapter> = match id {
        "customers" => Arc::new(CustomersAdapter::new(client)),
        "campaigns" => Arc::new(CampaignsAdapter::new(client)),
        "budgets" => Arc::new(BudgetsAdapter::new(client)),
        "ad_groups" => Arc::new(AdGroupsAdapter::new(client)),
        "keywords" => Arc::new(KeywordsAdapter::new(client)),
        "search" => Arc::new(SearchAdapter::with_cancel_flag(client, Arc::clone(cancel))),
        "assets" => Arc::new(AssetsAdapter::new(client)),
        "asset_group_assets" => Arc::new(AssetGroupAssetsAdapter::new(client)),
        "keyword_plans" => Arc::new(KeywordPlansAdapter::new(client)),
        "recommendations" => Arc::new(RecommendationsAdapter::new(client)),
        "conversions" => Arc::new(ConversionsAdapter::new(client)),
        "labels" => Arc::new(LabelsAdapter::new(client)),
        "customer_links" => Arc::new(CustomerLinksAdapter::new(client)),
        other => {
            warn!(adapter_id = %other, "no constructor for adapter id, skipping");
            return None;
        }
    };
    Some(adapter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gads_api::{Credentials, GoogleAdsConfig};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn test_client() -> Arc<GoogleAdsClient> {
        Arc::new(GoogleAdsClient::new(GoogleAdsConfig {
            developer_token: "dev-token".into(),
            login_customer_id: None,
            credentials: Credentials::StaticToken {
                access_token: "test-token".into(),
            },
            base_url: "http://127.0.0.1:9".into(),
        }))
    }

    // -- Group resolution --

    #[test]
    fn core_group_in_declared_order() {
        assert_eq!(
            resolve_groups(&strings(&["core"])),
            ["customers", "campaigns", "budgets", "ad_groups", "keywords", "search"]
        );
    }

    #[test]
    fn all_expands_to_every_adapter_once() {
        let ids = resolve_groups(&strings(&["all"]));
        assert_eq!(ids.len(), 13);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 13);
    }

    #[test]
    fn repeated_and_overlapping_groups_dedupe() {
        let ids = resolve_groups(&strings(&["core", "core", "all"]));
        assert_eq!(ids.len(), 13);
        // First mention wins the ordering.
        assert_eq!(ids[0], "customers");
        assert_eq!(ids[5], "search");
    }

    #[test]
    fn unknown_groups_are_skipped() {
        let ids = resolve_groups(&strings(&["shopping", "organization"]));
        assert_eq!(ids, ["labels"]);
        assert!(resolve_groups(&strings(&["shopping"])).is_empty());
    }

    #[test]
    fn group_names_are_trimmed() {
        let ids = resolve_groups(&strings(&[" conversions ", "account"]));
        assert_eq!(ids, ["conversions", "customer_links"]);
    }

    // -- Adapter construction --

    #[test]
    fn build_mounts_one_adapter_per_id() {
        let cancel = Arc::new(AtomicBool::new(false));
        let adapters = build_adapters(&test_client(), &strings(&["core"]), &cancel);
        let ids: Vec<&str> = adapters.iter().map(|a| a.id()).collect();
        assert_eq!(
            ids,
            ["customers", "campaigns", "budgets", "ad_groups", "keywords", "search"]
        );
    }

    #[test]
    fn every_known_id_constructs() {
        let cancel = Arc::new(AtomicBool::new(false));
        let adapters = build_adapters(&test_client(), &strings(&["all"]), &cancel);
        assert_eq!(adapters.len(), 13);
        let total_tools: usize = adapters.iter().map(|a| a.tools().len()).sum();
        assert_eq!(total_tools, 43);
    }
}
