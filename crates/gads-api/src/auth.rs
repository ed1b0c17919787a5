//! Access token acquisition.
//!
//! Google Ads REST calls authenticate with a short-lived OAuth 2.0 access
//! token minted from the long-lived refresh token in the configuration.
//! [`TokenProvider`] performs the `refresh_token` grant against Google's
//! token endpoint and caches the result until shortly before expiry, so
//! concurrent API calls share one token and one refresh.

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::Credentials;
use crate::error::{ApiError, Result};

/// Google's OAuth 2.0 token endpoint.
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens are treated as expired this many seconds early, so a token never
/// lapses mid-request.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    /// Unix timestamp (seconds) when the token expires, if the server said.
    expires_at: Option<i64>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at - EXPIRY_MARGIN_SECS,
            // Tokens without expiry info never go stale locally.
            None => false,
        }
    }
}

/// Success body returned by the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Error body returned by the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Produces bearer tokens for API requests.
///
/// In OAuth mode the provider exchanges the refresh token for an access
/// token on first use and whenever the cached token goes stale. In
/// static-token mode it hands back the configured token unchanged.
pub struct TokenProvider {
    credentials: Credentials,
    token_url: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(credentials: Credentials, client: reqwest::Client) -> Self {
        Self {
            credentials,
            token_url: TOKEN_URL.to_string(),
            client,
            cached: Mutex::new(None),
        }
    }

    /// The current access token, refreshing first if the cached one is stale.
    pub async fn access_token(&self) -> Result<String> {
        let (client_id, client_secret, refresh_token) = match &self.credentials {
            Credentials::StaticToken { access_token } => return Ok(access_token.clone()),
            Credentials::OAuth {
                client_id,
                client_secret,
                refresh_token,
            } => (client_id, client_secret, refresh_token),
        };

        // Holding the lock across the refresh serializes concurrent callers
        // onto a single token exchange.
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && !token.is_expired()
        {
            return Ok(token.access_token.clone());
        }

        tracing::debug!(token_url = %self.token_url, "refreshing access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        let token = Self::parse_token_response(response).await?;
        let access = token.access_token.clone();
        *cached = Some(token);
        Ok(access)
    }

    /// Turn the token endpoint's reply into a cached token.
    async fn parse_token_response(response: reqwest::Response) -> Result<CachedToken> {
        let status = response.status();

        if status.is_success() {
            let token: TokenResponse = response.json().await?;
            let expires_at = token.expires_in.map(|secs| Utc::now().timestamp() + secs);
            tracing::debug!("access token refreshed");
            Ok(CachedToken {
                access_token: token.access_token,
                expires_at,
            })
        } else {
            let body = response.text().await.unwrap_or_default();

            // Google answers failures with a structured OAuth error body.
            if let Ok(err) = serde_json::from_str::<TokenErrorResponse>(&body) {
                Err(ApiError::Auth {
                    reason: err.error_description.unwrap_or(err.error),
                })
            } else {
                Err(ApiError::Auth {
                    reason: format!("token endpoint returned HTTP {status}: {body}"),
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_passes_through() {
        let provider = TokenProvider::new(
            Credentials::StaticToken {
                access_token: "fixed-token".to_string(),
            },
            reqwest::Client::new(),
        );

        assert_eq!(provider.access_token().await.unwrap(), "fixed-token");
        // Repeated calls keep returning the same token without caching games.
        assert_eq!(provider.access_token().await.unwrap(), "fixed-token");
    }

    #[test]
    fn cached_token_with_future_expiry_is_fresh() {
        let token = CachedToken {
            access_token: "cached".to_string(),
            expires_at: Some(Utc::now().timestamp() + 3600),
        };
        assert!(!token.is_expired());
    }

    #[test]
    fn cached_token_with_past_expiry_is_stale() {
        let token = CachedToken {
            access_token: "cached".to_string(),
            expires_at: Some(Utc::now().timestamp() - 100),
        };
        assert!(token.is_expired());
    }

    #[test]
    fn cached_token_inside_safety_margin_is_stale() {
        let token = CachedToken {
            access_token: "cached".to_string(),
            // 30 seconds out is inside the 60-second early-expiry window.
            expires_at: Some(Utc::now().timestamp() + 30),
        };
        assert!(token.is_expired());
    }

    #[test]
    fn cached_token_without_expiry_is_fresh() {
        let token = CachedToken {
            access_token: "cached".to_string(),
            expires_at: None,
        };
        assert!(!token.is_expired());
    }

    #[test]
    fn token_endpoint_success_body_parses() {
        let json = r#"{ "access_token": "ya29.abc", "expires_in": 3599, "token_type": "Bearer" }"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "ya29.abc");
        assert_eq!(parsed.expires_in, Some(3599));
    }

    #[test]
    fn token_endpoint_error_body_parses() {
        let json = r#"{ "error": "invalid_grant", "error_description": "Token has been revoked." }"#;
        let failure: TokenErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(failure.error, "invalid_grant");
        assert_eq!(
            failure.error_description.as_deref(),
            Some("Token has been revoked.")
        );
    }

    #[test]
    fn provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenProvider>();
    }
}
