//! Integration tests for the gads-adapters crate.
//!
//! These tests exercise the adapters as one catalogue: tool discovery,
//! schema discipline, and the validation paths that must fail before any
//! request would leave the process. Nothing here talks to the API.

use std::collections::HashSet;
use std::sync::Arc;

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
use gads_adapters::{Adapter, AdapterError, ErrorKind, dispatch};
use gads_api::{Credentials, GoogleAdsClient, GoogleAdsConfig};
use serde_json::json;

/// Client pointed at an unroutable origin; nothing in these tests reaches
/// the point of sending a request through it.
fn offline_client() -> Arc<GoogleAdsClient> {
    Arc::new(GoogleAdsClient::new(GoogleAdsConfig {
        developer_token: "dev-token".into(),
        login_customer_id: None,
        credentials: Credentials::StaticToken {
            access_token: "test-token".into(),
        },
        base_url: "http://127.0.0.1:9".into(),
    }))
}

fn all_adapters() -> Vec<Arc<dyn Adapter>> {
    let client = offline_client();
    vec![
        Arc::new(CustomersAdapter::new(Arc::clone(&client))),
        Arc::new(CustomerLinksAdapter::new(Arc::clone(&client))),
        Arc::new(BudgetsAdapter::new(Arc::clone(&client))),
        Arc::new(CampaignsAdapter::new(Arc::clone(&client))),
        Arc::new(AdGroupsAdapter::new(Arc::clone(&client))),
        Arc::new(KeywordsAdapter::new(Arc::clone(&client))),
        Arc::new(AssetsAdapter::new(Arc::clone(&client))),
        Arc::new(AssetGroupAssetsAdapter::new(Arc::clone(&client))),
        Arc::new(LabelsAdapter::new(Arc::clone(&client))),
        Arc::new(ConversionsAdapter::new(Arc::clone(&client))),
        Arc::new(RecommendationsAdapter::new(Arc::clone(&client))),
        Arc::new(KeywordPlansAdapter::new(Arc::clone(&client))),
        Arc::new(SearchAdapter::new(client)),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
//  Catalogue integrity
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn catalogue_has_forty_three_unique_tools() {
    let adapters = all_adapters();
    assert_eq!(adapters.len(), 13);

    let mut names = HashSet::new();
    let mut total = 0;
    for adapter in &adapters {
        for tool in adapter.tools() {
            assert!(
                names.insert(tool.name.clone()),
                "duplicate tool name: {}",
                tool.name
            );
            total += 1;
        }
    }
    assert_eq!(total, 43);
}

#[test]
fn every_schema_is_a_well_formed_object() {
    for adapter in all_adapters() {
        for tool in adapter.tools() {
            let schema = &tool.input_schema;
            assert_eq!(
                schema["type"], "object",
                "{}: schema must be an object schema",
                tool.name
            );
            let properties = schema["properties"]
                .as_object()
                .unwrap_or_else(|| panic!("{}: schema has no properties", tool.name));

            // Required fields must exist among the declared properties.
            if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
                for field in required {
                    let field = field.as_str().unwrap();
                    assert!(
                        properties.contains_key(field),
                        "{}: required field '{field}' is not declared",
                        tool.name
                    );
                }
            }

            assert!(!tool.description.is_empty(), "{}: empty description", tool.name);
        }
    }
}

#[test]
fn mutate_flags_are_declared_as_booleans() {
    for adapter in all_adapters() {
        for tool in adapter.tools() {
            let properties = tool.input_schema["properties"].as_object().unwrap();
            for flag in ["partial_failure", "validate_only"] {
                if let Some(decl) = properties.get(flag) {
                    assert_eq!(
                        decl["type"], "boolean",
                        "{}: '{flag}' must be boolean",
                        tool.name
                    );
                }
            }

            // The flags are opt-in, never required inputs.
            if let Some(required) = tool.input_schema.get("required").and_then(|r| r.as_array()) {
                for field in required {
                    let field = field.as_str().unwrap();
                    assert_ne!(field, "partial_failure", "{}", tool.name);
                    assert_ne!(field, "validate_only", "{}", tool.name);
                }
            }
        }
    }
}

#[test]
fn flag_exposure_matches_the_wire_verbs() {
    let by_name = |name: &str| -> serde_json::Value {
        for adapter in all_adapters() {
            for tool in adapter.tools() {
                if tool.name == name {
                    return tool.input_schema;
                }
            }
        }
        panic!("tool {name} not in catalogue");
    };

    // Plural-operation mutates take both flags.
    let schema = by_name("budget_create");
    assert!(schema["properties"].get("partial_failure").is_some());
    assert!(schema["properties"].get("validate_only").is_some());

    // The link services mutate a single operation: validate_only only.
    let schema = by_name("customer_link_update_client_hidden");
    assert!(schema["properties"].get("partial_failure").is_none());
    assert!(schema["properties"].get("validate_only").is_some());

    // The recommendation verbs take partial_failure but no validate_only.
    let schema = by_name("recommendation_apply");
    assert!(schema["properties"].get("partial_failure").is_some());
    assert!(schema["properties"].get("validate_only").is_none());

    // The click upload documents its true default.
    let schema = by_name("conversion_upload_clicks");
    let desc = schema["properties"]["partial_failure"]["description"]
        .as_str()
        .unwrap();
    assert!(desc.contains("default true"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Dispatch failures
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unknown_tool_names_adapter_and_tool() {
    let adapter = BudgetsAdapter::new(offline_client());
    let err = adapter
        .execute_tool("budget_explode", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::ToolNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
    let msg = err.to_string();
    assert!(msg.contains("budget_explode"));
    assert!(msg.contains("budgets"));
}

#[tokio::test]
async fn every_adapter_rejects_unknown_tools() {
    for adapter in all_adapters() {
        let err = dispatch(adapter.as_ref(), "no_such_tool", json!({}))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AdapterError::ToolNotFound { .. }),
            "{} accepted an unknown tool",
            adapter.id()
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Validation before transport
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn missing_customer_id_fails_in_process() {
    let adapter = BudgetsAdapter::new(offline_client());
    let err = adapter
        .execute_tool("budget_create", json!({"name": "B", "amount_micros": 1}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("'customer_id' is required"));
}

#[tokio::test]
async fn malformed_customer_id_is_reported_with_the_input() {
    let adapter = CampaignsAdapter::new(offline_client());
    let err = adapter
        .execute_tool("campaign_list", json!({"customer_id": "not-a-customer"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("not-a-customer"));
}

#[tokio::test]
async fn bad_enum_value_is_rejected_by_name() {
    let adapter = KeywordsAdapter::new(offline_client());
    let err = adapter
        .execute_tool(
            "keyword_add",
            json!({
                "customer_id": "1234567890",
                "ad_group_id": 42,
                "keywords": [{"text": "shoes", "match_type": "FUZZY"}]
            }),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("FUZZY"));
}

#[tokio::test]
async fn search_requires_query_text() {
    let adapter = SearchAdapter::new(offline_client());
    let err = adapter
        .execute_tool("search_query", json!({"customer_id": "1234567890"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("'query' is required"));
}
