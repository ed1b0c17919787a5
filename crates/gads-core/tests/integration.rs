//! Integration tests for the gads-core crate.
//!
//! These tests exercise the domain primitives the way the adapter layer
//! combines them: customer IDs feeding resource names, optional inputs
//! feeding field masks, and the registry tracking mounted adapters.

use std::str::FromStr;

use gads_core::enums::{AssetFieldType, CampaignStatus, KeywordMatchType};
use gads_core::{AdapterRegistry, CustomerId, FieldMask, ResourceName};

// ═══════════════════════════════════════════════════════════════════════
//  Customer IDs and resource names
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn dashed_input_flows_into_resource_names() {
    // Callers pass dashed IDs; everything downstream sees bare digits.
    let customer = CustomerId::new("123-456-7890").unwrap();
    assert_eq!(customer.as_str(), "1234567890");

    let budget = ResourceName::campaign_budget(&customer, "42").unwrap();
    assert_eq!(budget.as_str(), "customers/1234567890/campaignBudgets/42");

    let criterion = ResourceName::ad_group_criterion(&customer, "555", "777").unwrap();
    assert_eq!(
        criterion.as_str(),
        "customers/1234567890/adGroupCriteria/555~777"
    );
}

#[test]
fn normalization_is_idempotent() {
    let once = CustomerId::new("123-456-7890").unwrap();
    let twice = CustomerId::new(once.as_str()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn link_names_agree_from_both_directions() {
    let client = CustomerId::new("111-111-1111").unwrap();
    let manager = CustomerId::new("222-222-2222").unwrap();

    // The same link has two addresses, one per owning account.
    let from_client = ResourceName::customer_manager_link(&client, &manager, "9").unwrap();
    let from_manager = ResourceName::customer_client_link(&manager, &client, "9").unwrap();

    assert_eq!(
        from_client.as_str(),
        "customers/1111111111/customerManagerLinks/2222222222~9"
    );
    assert_eq!(
        from_manager.as_str(),
        "customers/2222222222/customerClientLinks/1111111111~9"
    );
}

#[test]
fn enum_wire_name_becomes_composite_component() {
    let customer = CustomerId::new("1234567890").unwrap();
    let name = ResourceName::asset_group_asset(
        &customer,
        "100",
        "200",
        AssetFieldType::SquareMarketingImage,
    )
    .unwrap();
    assert_eq!(
        name.as_str(),
        "customers/1234567890/assetGroupAssets/100~200~SQUARE_MARKETING_IMAGE"
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  Update masks from optional inputs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn mask_mirrors_supplied_inputs_only() {
    // The shape of every update tool: inspect each optional input once.
    let name: Option<&str> = Some("renamed");
    let amount: Option<i64> = Some(2_500_000);
    let shared: Option<bool> = None;

    let mut mask = FieldMask::new();
    mask.maybe("name", &name)
        .maybe("amount_micros", &amount)
        .maybe("explicitly_shared", &shared);

    assert_eq!(mask.paths(), ["name", "amount_micros"]);
    assert_eq!(mask.to_wire(), "name,amount_micros");
}

#[test]
fn mask_and_resource_name_share_inputs_without_drift() {
    let customer = CustomerId::new("1234567890").unwrap();
    let name = ResourceName::campaign(&customer, "17").unwrap();

    let status: Option<CampaignStatus> = Some(CampaignStatus::Paused);
    let mut mask = FieldMask::new();
    mask.maybe("status", &status);

    // A second pass over the same inputs produces identical wire text.
    let name_again = ResourceName::campaign(&customer, "17").unwrap();
    let mut mask_again = FieldMask::new();
    mask_again.maybe("status", &status);

    assert_eq!(name, name_again);
    assert_eq!(mask.to_wire(), mask_again.to_wire());
}

// ═══════════════════════════════════════════════════════════════════════
//  Wire enums
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_advertised_wire_name_parses_back() {
    for wire in KeywordMatchType::wire_names() {
        let parsed = KeywordMatchType::from_str(wire).unwrap();
        assert_eq!(parsed.as_str(), *wire);
    }
}

#[test]
fn unknown_enum_value_is_a_named_rejection() {
    let err = CampaignStatus::from_str("paused").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CampaignStatus"));
    assert!(msg.contains("paused"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Adapter registry
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn registry_reflects_registrations() {
    let registry = AdapterRegistry::new();
    registry.register("campaigns", "Campaign management", 3);
    registry.register("budgets", "Budget management", 3);
    registry.register("search", "GAQL search", 5);

    assert_eq!(registry.count(), 3);
    assert_eq!(registry.total_tools(), 11);
    assert!(registry.contains("budgets"));
    assert!(!registry.contains("labels"));

    // Listings come back sorted by ID.
    assert_eq!(registry.list_ids(), ["budgets", "campaigns", "search"]);

    let info = registry.get("search").unwrap();
    assert_eq!(info.description, "GAQL search");
    assert_eq!(info.tool_count, 5);
}

#[test]
fn registry_lookup_of_unknown_id_fails() {
    let registry = AdapterRegistry::new();
    assert!(registry.get("nope").is_err());
}
