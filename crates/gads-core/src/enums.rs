//! Wire enums for the Google Ads API.
//!
//! Every string-enum parameter accepted by a tool is represented as a closed
//! Rust enum whose variants map 1:1 to the upper-snake-case names the API
//! uses on the wire. Parsing is exact: an unknown name is a typed error
//! naming both the enum and the offending value, never a silent fallback.
//!
//! All enums round-trip: `T::from_str(t.as_str()) == Ok(t)`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// The upper-snake-case name used on the wire.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// All wire names, in declaration order. Used for tool schemas.
            pub const fn wire_names() -> &'static [&'static str] {
                &[$($wire,)+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(CoreError::UnknownEnumValue {
                        enum_name: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Placement of an asset within an asset group.
    ///
    /// The wire name doubles as the third component of the composite
    /// `assetGroupAssets/{group}~{asset}~{FIELD_TYPE}` resource name.
    AssetFieldType {
        Headline => "HEADLINE",
        Description => "DESCRIPTION",
        LongHeadline => "LONG_HEADLINE",
        BusinessName => "BUSINESS_NAME",
        MarketingImage => "MARKETING_IMAGE",
        SquareMarketingImage => "SQUARE_MARKETING_IMAGE",
        PortraitMarketingImage => "PORTRAIT_MARKETING_IMAGE",
        Logo => "LOGO",
        LandscapeLogo => "LANDSCAPE_LOGO",
        YoutubeVideo => "YOUTUBE_VIDEO",
        CallToActionSelection => "CALL_TO_ACTION_SELECTION",
    }
}

wire_enum! {
    /// Status of an asset-to-asset-group link.
    AssetLinkStatus {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Removed => "REMOVED",
    }
}

wire_enum! {
    /// Asset content type, as exposed by the asset tools.
    AssetType {
        Text => "TEXT",
        Image => "IMAGE",
        YoutubeVideo => "YOUTUBE_VIDEO",
    }
}

wire_enum! {
    /// Spending cadence of a campaign budget.
    BudgetDeliveryMethod {
        Standard => "STANDARD",
        Accelerated => "ACCELERATED",
    }
}

wire_enum! {
    /// Serving status of a campaign.
    CampaignStatus {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Removed => "REMOVED",
    }
}

wire_enum! {
    /// Primary serving channel of a campaign.
    AdvertisingChannelType {
        Search => "SEARCH",
        Display => "DISPLAY",
        Shopping => "SHOPPING",
        Hotel => "HOTEL",
        Video => "VIDEO",
        MultiChannel => "MULTI_CHANNEL",
        Local => "LOCAL",
        Smart => "SMART",
        PerformanceMax => "PERFORMANCE_MAX",
        LocalServices => "LOCAL_SERVICES",
        Travel => "TRAVEL",
        DemandGen => "DEMAND_GEN",
    }
}

wire_enum! {
    /// Serving status of an ad group.
    AdGroupStatus {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Removed => "REMOVED",
    }
}

wire_enum! {
    /// The kind of ads an ad group can contain.
    AdGroupType {
        SearchStandard => "SEARCH_STANDARD",
        DisplayStandard => "DISPLAY_STANDARD",
        ShoppingProductAds => "SHOPPING_PRODUCT_ADS",
        HotelAds => "HOTEL_ADS",
        SearchDynamicAds => "SEARCH_DYNAMIC_ADS",
        VideoResponsive => "VIDEO_RESPONSIVE",
        SmartCampaignAds => "SMART_CAMPAIGN_ADS",
        TravelAds => "TRAVEL_ADS",
    }
}

wire_enum! {
    /// Serving status of an ad group criterion.
    CriterionStatus {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Removed => "REMOVED",
    }
}

wire_enum! {
    /// Keyword match type.
    KeywordMatchType {
        Exact => "EXACT",
        Phrase => "PHRASE",
        Broad => "BROAD",
    }
}

wire_enum! {
    /// Reporting category of a conversion action.
    ConversionActionCategory {
        Default => "DEFAULT",
        PageView => "PAGE_VIEW",
        Purchase => "PURCHASE",
        Signup => "SIGNUP",
        Lead => "LEAD",
        Download => "DOWNLOAD",
        AddToCart => "ADD_TO_CART",
        BeginCheckout => "BEGIN_CHECKOUT",
        SubscribePaid => "SUBSCRIBE_PAID",
        PhoneCallLead => "PHONE_CALL_LEAD",
        SubmitLeadForm => "SUBMIT_LEAD_FORM",
        Contact => "CONTACT",
        Engagement => "ENGAGEMENT",
    }
}

wire_enum! {
    /// How a conversion is tracked.
    ConversionActionType {
        Webpage => "WEBPAGE",
        AdCall => "AD_CALL",
        ClickToCall => "CLICK_TO_CALL",
        UploadClicks => "UPLOAD_CLICKS",
        UploadCalls => "UPLOAD_CALLS",
        WebsiteCall => "WEBSITE_CALL",
        GooglePlayDownload => "GOOGLE_PLAY_DOWNLOAD",
        GooglePlayInAppPurchase => "GOOGLE_PLAY_IN_APP_PURCHASE",
    }
}

wire_enum! {
    /// Lifecycle status of a conversion action.
    ConversionActionStatus {
        Enabled => "ENABLED",
        Removed => "REMOVED",
        Hidden => "HIDDEN",
    }
}

wire_enum! {
    /// Status of a manager-client link.
    ManagerLinkStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Pending => "PENDING",
        Refused => "REFUSED",
        Canceled => "CANCELED",
    }
}

wire_enum! {
    /// How much of the mutated resource the API echoes back.
    ResponseContentType {
        ResourceNameOnly => "RESOURCE_NAME_ONLY",
        MutableResource => "MUTABLE_RESOURCE",
    }
}

wire_enum! {
    /// Whether a search returns an aggregate summary row.
    SummaryRowSetting {
        NoSummaryRow => "NO_SUMMARY_ROW",
        SummaryRowWithResults => "SUMMARY_ROW_WITH_RESULTS",
        SummaryRowOnly => "SUMMARY_ROW_ONLY",
    }
}

wire_enum! {
    /// Lifecycle status of a label.
    LabelStatus {
        Enabled => "ENABLED",
        Removed => "REMOVED",
    }
}

wire_enum! {
    /// Forecast window of a keyword plan.
    ForecastInterval {
        NextWeek => "NEXT_WEEK",
        NextMonth => "NEXT_MONTH",
        NextQuarter => "NEXT_QUARTER",
    }
}

wire_enum! {
    /// Network scope for keyword idea generation.
    KeywordPlanNetwork {
        GoogleSearch => "GOOGLE_SEARCH",
        GoogleSearchAndPartners => "GOOGLE_SEARCH_AND_PARTNERS",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn round_trip_every_variant() {
        for name in KeywordMatchType::wire_names() {
            let parsed = KeywordMatchType::from_str(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
        for name in AssetFieldType::wire_names() {
            let parsed = AssetFieldType::from_str(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
        for name in AdvertisingChannelType::wire_names() {
            let parsed = AdvertisingChannelType::from_str(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
        for name in ManagerLinkStatus::wire_names() {
            let parsed = ManagerLinkStatus::from_str(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn unknown_value_names_enum_and_input() {
        let err = CampaignStatus::from_str("RUNNING").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CampaignStatus"));
        assert!(msg.contains("RUNNING"));
    }

    #[test]
    fn parse_is_exact_not_case_insensitive() {
        assert!(KeywordMatchType::from_str("broad").is_err());
        assert!(KeywordMatchType::from_str("BROAD").is_ok());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_value(BudgetDeliveryMethod::Standard).unwrap();
        assert_eq!(json, serde_json::json!("STANDARD"));

        let back: BudgetDeliveryMethod = serde_json::from_value(json).unwrap();
        assert_eq!(back, BudgetDeliveryMethod::Standard);
    }

    #[test]
    fn field_type_wire_name_is_composite_safe() {
        // Composite resource names embed the wire name verbatim.
        assert_eq!(AssetFieldType::Headline.as_str(), "HEADLINE");
        assert_eq!(
            AssetFieldType::SquareMarketingImage.as_str(),
            "SQUARE_MARKETING_IMAGE"
        );
    }
}
