//! Resource name construction.
//!
//! Every Google Ads entity is addressed by a fully-qualified resource name
//! of the form `customers/{cid}/{collection}/{id}`. Association resources
//! use a composite final segment whose components are joined with `~` in a
//! resource-specific order. The constructors here are the single source of
//! those orderings, so create, update, and remove paths always produce
//! byte-identical names for the same inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::customer::CustomerId;
use crate::enums::AssetFieldType;
use crate::error::{CoreError, Result};

/// A fully-qualified Google Ads resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

fn require(collection: &'static str, component: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::EmptyResourceComponent {
            collection,
            component,
        });
    }
    Ok(())
}

impl ResourceName {
    /// Wrap an already fully-qualified resource name supplied by a caller.
    pub fn from_raw(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `customers/{cid}`
    pub fn customer(customer: &CustomerId) -> Self {
        Self(customer.resource_name())
    }

    /// `customers/{cid}/campaigns/{campaign_id}`
    pub fn campaign(customer: &CustomerId, campaign_id: &str) -> Result<Self> {
        require("campaigns", "campaign_id", campaign_id)?;
        Ok(Self(format!(
            "customers/{}/campaigns/{}",
            customer, campaign_id
        )))
    }

    /// `customers/{cid}/campaignBudgets/{budget_id}`
    pub fn campaign_budget(customer: &CustomerId, budget_id: &str) -> Result<Self> {
        require("campaignBudgets", "budget_id", budget_id)?;
        Ok(Self(format!(
            "customers/{}/campaignBudgets/{}",
            customer, budget_id
        )))
    }

    /// `customers/{cid}/adGroups/{ad_group_id}`
    pub fn ad_group(customer: &CustomerId, ad_group_id: &str) -> Result<Self> {
        require("adGroups", "ad_group_id", ad_group_id)?;
        Ok(Self(format!(
            "customers/{}/adGroups/{}",
            customer, ad_group_id
        )))
    }

    /// `customers/{cid}/assets/{asset_id}`
    pub fn asset(customer: &CustomerId, asset_id: &str) -> Result<Self> {
        require("assets", "asset_id", asset_id)?;
        Ok(Self(format!("customers/{}/assets/{}", customer, asset_id)))
    }

    /// `customers/{cid}/assetGroups/{asset_group_id}`
    pub fn asset_group(customer: &CustomerId, asset_group_id: &str) -> Result<Self> {
        require("assetGroups", "asset_group_id", asset_group_id)?;
        Ok(Self(format!(
            "customers/{}/assetGroups/{}",
            customer, asset_group_id
        )))
    }

    /// `customers/{cid}/labels/{label_id}`
    pub fn label(customer: &CustomerId, label_id: &str) -> Result<Self> {
        require("labels", "label_id", label_id)?;
        Ok(Self(format!("customers/{}/labels/{}", customer, label_id)))
    }

    /// `customers/{cid}/conversionActions/{conversion_action_id}`
    pub fn conversion_action(customer: &CustomerId, conversion_action_id: &str) -> Result<Self> {
        require("conversionActions", "conversion_action_id", conversion_action_id)?;
        Ok(Self(format!(
            "customers/{}/conversionActions/{}",
            customer, conversion_action_id
        )))
    }

    /// `customers/{cid}/keywordPlans/{keyword_plan_id}`
    pub fn keyword_plan(customer: &CustomerId, keyword_plan_id: &str) -> Result<Self> {
        require("keywordPlans", "keyword_plan_id", keyword_plan_id)?;
        Ok(Self(format!(
            "customers/{}/keywordPlans/{}",
            customer, keyword_plan_id
        )))
    }

    /// `customers/{cid}/recommendations/{recommendation_id}`
    pub fn recommendation(customer: &CustomerId, recommendation_id: &str) -> Result<Self> {
        require("recommendations", "recommendation_id", recommendation_id)?;
        Ok(Self(format!(
            "customers/{}/recommendations/{}",
            customer, recommendation_id
        )))
    }

    /// `customers/{cid}/adGroupCriteria/{ad_group_id}~{criterion_id}`
    pub fn ad_group_criterion(
        customer: &CustomerId,
        ad_group_id: &str,
        criterion_id: &str,
    ) -> Result<Self> {
        require("adGroupCriteria", "ad_group_id", ad_group_id)?;
        require("adGroupCriteria", "criterion_id", criterion_id)?;
        Ok(Self(format!(
            "customers/{}/adGroupCriteria/{}~{}",
            customer, ad_group_id, criterion_id
        )))
    }

    /// `customers/{cid}/assetGroupAssets/{asset_group_id}~{asset_id}~{FIELD_TYPE}`
    ///
    /// The third component is the field type's wire name, uppercase.
    pub fn asset_group_asset(
        customer: &CustomerId,
        asset_group_id: &str,
        asset_id: &str,
        field_type: AssetFieldType,
    ) -> Result<Self> {
        require("assetGroupAssets", "asset_group_id", asset_group_id)?;
        require("assetGroupAssets", "asset_id", asset_id)?;
        Ok(Self(format!(
            "customers/{}/assetGroupAssets/{}~{}~{}",
            customer,
            asset_group_id,
            asset_id,
            field_type.as_str()
        )))
    }

    /// `customers/{cid}/campaignLabels/{campaign_id}~{label_id}`
    pub fn campaign_label(
        customer: &CustomerId,
        campaign_id: &str,
        label_id: &str,
    ) -> Result<Self> {
        require("campaignLabels", "campaign_id", campaign_id)?;
        require("campaignLabels", "label_id", label_id)?;
        Ok(Self(format!(
            "customers/{}/campaignLabels/{}~{}",
            customer, campaign_id, label_id
        )))
    }

    /// `customers/{cid}/adGroupLabels/{ad_group_id}~{label_id}`
    pub fn ad_group_label(
        customer: &CustomerId,
        ad_group_id: &str,
        label_id: &str,
    ) -> Result<Self> {
        require("adGroupLabels", "ad_group_id", ad_group_id)?;
        require("adGroupLabels", "label_id", label_id)?;
        Ok(Self(format!(
            "customers/{}/adGroupLabels/{}~{}",
            customer, ad_group_id, label_id
        )))
    }

    /// `customers/{client_cid}/customerManagerLinks/{manager_cid}~{manager_link_id}`
    ///
    /// The link lives under the client account; the composite names the
    /// manager account and the link ID.
    pub fn customer_manager_link(
        client: &CustomerId,
        manager: &CustomerId,
        manager_link_id: &str,
    ) -> Result<Self> {
        require("customerManagerLinks", "manager_link_id", manager_link_id)?;
        Ok(Self(format!(
            "customers/{}/customerManagerLinks/{}~{}",
            client, manager, manager_link_id
        )))
    }

    /// `customers/{manager_cid}/customerClientLinks/{client_cid}~{manager_link_id}`
    ///
    /// The mirror of [`ResourceName::customer_manager_link`], seen from the
    /// manager account.
    pub fn customer_client_link(
        manager: &CustomerId,
        client: &CustomerId,
        manager_link_id: &str,
    ) -> Result<Self> {
        require("customerClientLinks", "manager_link_id", manager_link_id)?;
        Ok(Self(format!(
            "customers/{}/customerClientLinks/{}~{}",
            manager, client, manager_link_id
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> CustomerId {
        CustomerId::new(s).unwrap()
    }

    #[test]
    fn simple_names() {
        let customer = cid("123-456-7890");
        assert_eq!(
            ResourceName::campaign(&customer, "111").unwrap().as_str(),
            "customers/1234567890/campaigns/111"
        );
        assert_eq!(
            ResourceName::campaign_budget(&customer, "222")
                .unwrap()
                .as_str(),
            "customers/1234567890/campaignBudgets/222"
        );
        assert_eq!(
            ResourceName::customer(&customer).as_str(),
            "customers/1234567890"
        );
    }

    #[test]
    fn asset_group_asset_composite_order() {
        let customer = cid("1234567890");
        let name = ResourceName::asset_group_asset(
            &customer,
            "9876543210",
            "1111111111",
            AssetFieldType::Headline,
        )
        .unwrap();
        assert_eq!(
            name.as_str(),
            "customers/1234567890/assetGroupAssets/9876543210~1111111111~HEADLINE"
        );
    }

    #[test]
    fn ad_group_criterion_composite_order() {
        let customer = cid("1234567890");
        let name = ResourceName::ad_group_criterion(&customer, "555", "777").unwrap();
        assert_eq!(
            name.as_str(),
            "customers/1234567890/adGroupCriteria/555~777"
        );
    }

    #[test]
    fn manager_and_client_link_orientation() {
        let client = cid("111-111-1111");
        let manager = cid("222-222-2222");

        let manager_link =
            ResourceName::customer_manager_link(&client, &manager, "333").unwrap();
        assert_eq!(
            manager_link.as_str(),
            "customers/1111111111/customerManagerLinks/2222222222~333"
        );

        let client_link = ResourceName::customer_client_link(&manager, &client, "333").unwrap();
        assert_eq!(
            client_link.as_str(),
            "customers/2222222222/customerClientLinks/1111111111~333"
        );
    }

    #[test]
    fn same_inputs_same_name() {
        // Create/update/remove paths must agree on the name byte for byte.
        let customer = cid("1234567890");
        let a = ResourceName::asset_group_asset(
            &customer,
            "9876543210",
            "1111111111",
            AssetFieldType::Headline,
        )
        .unwrap();
        let b = ResourceName::asset_group_asset(
            &customer,
            "9876543210",
            "1111111111",
            AssetFieldType::Headline,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_component_rejected() {
        let customer = cid("1234567890");
        let err = ResourceName::campaign(&customer, "").unwrap_err();
        assert!(matches!(err, CoreError::EmptyResourceComponent { .. }));

        let err = ResourceName::ad_group_criterion(&customer, "555", "  ").unwrap_err();
        assert!(err.to_string().contains("criterion_id"));
    }

    #[test]
    fn serde_transparent() {
        let customer = cid("1234567890");
        let name = ResourceName::label(&customer, "9").unwrap();
        let json = serde_json::to_value(&name).unwrap();
        assert_eq!(json, serde_json::json!("customers/1234567890/labels/9"));
    }
}
