//! Client configuration.
//!
//! Credentials and connection settings come from the environment, with an
//! optional `[google_ads]` section in `config/gads.toml` supplying
//! defaults. Environment variables always win.
//!
//! Required:
//! - `GOOGLE_ADS_DEVELOPER_TOKEN`
//! - either `GOOGLE_ADS_ACCESS_TOKEN` (static token mode), or the OAuth
//!   triple `GOOGLE_ADS_CLIENT_ID` / `GOOGLE_ADS_CLIENT_SECRET` /
//!   `GOOGLE_ADS_REFRESH_TOKEN`
//!
//! Optional:
//! - `GOOGLE_ADS_LOGIN_CUSTOMER_ID` -- manager account for the
//!   `login-customer-id` header, dashed or bare form
//! - `GOOGLE_ADS_API_BASE_URL` -- override for testing against a fake

use std::path::Path;

use serde::Deserialize;
use url::Url;

use gads_core::CustomerId;

use crate::error::{ApiError, Result};

/// Production REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com";

/// How the client authenticates API calls.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Refresh-token OAuth 2.0 flow; access tokens are minted on demand.
    OAuth {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
    /// A fixed, externally managed access token.
    StaticToken { access_token: String },
}

/// Everything the REST client needs to talk to the API.
#[derive(Debug, Clone)]
pub struct GoogleAdsConfig {
    /// Developer token sent in the `developer-token` header.
    pub developer_token: String,
    /// Manager account for the `login-customer-id` header, if any.
    pub login_customer_id: Option<CustomerId>,
    /// How to obtain bearer tokens.
    pub credentials: Credentials,
    /// API origin, without version segment or trailing slash.
    pub base_url: String,
}

/// TOML representation of the `[google_ads]` section in `config/gads.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
struct GoogleAdsToml {
    developer_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    access_token: Option<String>,
    login_customer_id: Option<String>,
    base_url: Option<String>,
}

/// Load the `[google_ads]` section from a TOML file, if present.
fn load_config_toml(path: &Path) -> Option<GoogleAdsToml> {
    #[derive(Deserialize)]
    struct Root {
        #[serde(default)]
        google_ads: Option<GoogleAdsToml>,
    }

    let content = std::fs::read_to_string(path).ok()?;
    let root: Root = toml::from_str(&content).ok()?;
    root.google_ads
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl GoogleAdsConfig {
    /// Build a config from the environment, with `config/gads.toml` as the
    /// fallback for values the environment does not set.
    pub fn from_env() -> Result<Self> {
        Self::from_env_and_file(Path::new("config/gads.toml"))
    }

    fn from_env_and_file(config_path: &Path) -> Result<Self> {
        let file = load_config_toml(config_path).unwrap_or_default();

        let developer_token = env_var("GOOGLE_ADS_DEVELOPER_TOKEN")
            .or(file.developer_token)
            .ok_or_else(|| missing("GOOGLE_ADS_DEVELOPER_TOKEN"))?;

        let credentials =
            if let Some(access_token) = env_var("GOOGLE_ADS_ACCESS_TOKEN").or(file.access_token) {
                Credentials::StaticToken { access_token }
            } else {
                Credentials::OAuth {
                    client_id: env_var("GOOGLE_ADS_CLIENT_ID")
                        .or(file.client_id)
                        .ok_or_else(|| missing("GOOGLE_ADS_CLIENT_ID"))?,
                    client_secret: env_var("GOOGLE_ADS_CLIENT_SECRET")
                        .or(file.client_secret)
                        .ok_or_else(|| missing("GOOGLE_ADS_CLIENT_SECRET"))?,
                    refresh_token: env_var("GOOGLE_ADS_REFRESH_TOKEN")
                        .or(file.refresh_token)
                        .ok_or_else(|| missing("GOOGLE_ADS_REFRESH_TOKEN"))?,
                }
            };

        let login_customer_id = env_var("GOOGLE_ADS_LOGIN_CUSTOMER_ID")
            .or(file.login_customer_id)
            .map(|raw| {
                CustomerId::new(&raw).map_err(|e| ApiError::Config {
                    reason: format!("GOOGLE_ADS_LOGIN_CUSTOMER_ID: {e}"),
                })
            })
            .transpose()?;

        let base_url = env_var("GOOGLE_ADS_API_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| ApiError::Config {
            reason: format!("GOOGLE_ADS_API_BASE_URL `{base_url}`: {e}"),
        })?;
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            developer_token,
            login_customer_id,
            credentials,
            base_url,
        })
    }
}

fn missing(name: &str) -> ApiError {
    ApiError::Config {
        reason: format!("missing required environment variable {name}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
