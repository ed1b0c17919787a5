//! Mutable resource payloads.
//!
//! These are the JSON bodies carried inside mutate operations. Every field
//! is optional and omitted from the wire when unset: a create sets the
//! fields it has, an update pairs a sparse payload with a field mask
//! listing exactly the supplied paths. Money and ID fields follow the
//! int64-as-string wire convention via [`gads_core::micros`].

use serde::{Deserialize, Serialize};

use gads_core::enums::{
    AdGroupStatus, AdGroupType, AdvertisingChannelType, AssetFieldType, AssetLinkStatus,
    BudgetDeliveryMethod, CampaignStatus, ConversionActionCategory, ConversionActionStatus,
    ConversionActionType, CriterionStatus, ForecastInterval, KeywordMatchType, LabelStatus,
    ManagerLinkStatus,
};
use gads_core::micros;

/// `customers/{cid}/campaignBudgets/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_micros: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<BudgetDeliveryMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicitly_shared: Option<bool>,
}

/// Which networks a campaign serves on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_google_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_search_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_content_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_partner_search_network: Option<bool>,
}

/// Manual CPC bidding scheme. An empty object selects the scheme with its
/// defaults, so every field stays optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCpc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_cpc_enabled: Option<bool>,
}

/// `customers/{cid}/campaigns/*` payload.
///
/// Dates are `YYYYMMDD` on the wire; the tool layer strips the dashes from
/// the `YYYY-MM-DD` input form before they land here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertising_channel_type: Option<AdvertisingChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_settings: Option<NetworkSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_cpc: Option<ManualCpc>,
}

/// `customers/{cid}/adGroups/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdGroupStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ad_group_type: Option<AdGroupType>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cpc_bid_micros: Option<i64>,
}

/// Keyword criterion payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<KeywordMatchType>,
}

/// `customers/{cid}/adGroupCriteria/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CriterionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordInfo>,
    #[serde(
        with = "micros::i64_string_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cpc_bid_micros: Option<i64>,
}

/// Text asset content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Image asset content; `data` is the base64-encoded image bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// YouTube video asset content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideoAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_video_id: Option<String>,
}

/// `customers/{cid}/assets/*` payload. Exactly one content one-of should be
/// set; the tool layer guarantees that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_asset: Option<TextAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_asset: Option<ImageAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_video_asset: Option<YoutubeVideoAsset>,
}

/// `customers/{cid}/assetGroupAssets/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetGroupAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<AssetFieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetLinkStatus>,
}

/// Display properties of a text label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `customers/{cid}/labels/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LabelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_label: Option<TextLabel>,
}

/// `customers/{cid}/campaignLabels/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// `customers/{cid}/adGroupLabels/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Default conversion value rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_use_default_value: Option<bool>,
}

/// `customers/{cid}/conversionActions/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ConversionActionCategory>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ConversionActionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConversionActionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_settings: Option<ValueSettings>,
}

/// One uploaded click conversion row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickConversion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_action: Option<String>,
    /// `yyyy-mm-dd hh:mm:ss+|-hh:mm` format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// `customers/{client_cid}/customerManagerLinks/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerManagerLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ManagerLinkStatus>,
}

/// `customers/{manager_cid}/customerClientLinks/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerClientLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

/// Forecast window of a keyword plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPlanForecastPeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_interval: Option<ForecastInterval>,
}

/// `customers/{cid}/keywordPlans/*` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_period: Option<KeywordPlanForecastPeriod>,
}

/// `customers/*` payload, used by client account creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptive_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_budget_serializes_only_set_fields() {
        let budget = CampaignBudget {
            amount_micros: Some(5_000_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json, serde_json::json!({"amountMicros": "5000000"}));
    }

    #[test]
    fn campaign_wire_field_names_are_camel_case() {
        let campaign = Campaign {
            name: Some("Spring Sale".to_string()),
            advertising_channel_type: Some(AdvertisingChannelType::Search),
            campaign_budget: Some("customers/1/campaignBudgets/2".to_string()),
            network_settings: Some(NetworkSettings {
                target_google_search: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["advertisingChannelType"], "SEARCH");
        assert_eq!(json["campaignBudget"], "customers/1/campaignBudgets/2");
        assert_eq!(json["networkSettings"]["targetGoogleSearch"], true);
        assert!(json.get("status").is_none());
    }

    #[test]
    fn ad_group_type_renames_to_type() {
        let ad_group = AdGroup {
            ad_group_type: Some(AdGroupType::SearchStandard),
            ..Default::default()
        };
        let json = serde_json::to_value(&ad_group).unwrap();
        assert_eq!(json, serde_json::json!({"type": "SEARCH_STANDARD"}));
    }

    #[test]
    fn keyword_criterion_nests_keyword_info() {
        let criterion = AdGroupCriterion {
            ad_group: Some("customers/1/adGroups/2".to_string()),
            status: Some(CriterionStatus::Enabled),
            keyword: Some(KeywordInfo {
                text: Some("running shoes".to_string()),
                match_type: Some(KeywordMatchType::Phrase),
            }),
            cpc_bid_micros: Some(250_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&criterion).unwrap();
        assert_eq!(json["keyword"]["matchType"], "PHRASE");
        assert_eq!(json["cpcBidMicros"], "250000");
    }

    #[test]
    fn conversion_action_type_renames_to_type() {
        let action = ConversionAction {
            action_type: Some(ConversionActionType::Webpage),
            category: Some(ConversionActionCategory::Purchase),
            ..Default::default()
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "WEBPAGE");
        assert_eq!(json["category"], "PURCHASE");
    }

    #[test]
    fn empty_manual_cpc_is_empty_object() {
        let campaign = Campaign {
            manual_cpc: Some(ManualCpc::default()),
            ..Default::default()
        };
        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json, serde_json::json!({"manualCpc": {}}));
    }
}
