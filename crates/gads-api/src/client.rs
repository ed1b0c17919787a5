//! Google Ads REST client.
//!
//! One [`GoogleAdsClient`] instance is shared (behind an `Arc`) by every
//! adapter. It owns the HTTP connection pool, attaches the three auth
//! headers to each request, and turns non-success responses into
//! [`ApiError::Status`] with the structured failure detail preserved.
//!
//! The client never retries and never rewrites vendor behavior; reliability
//! semantics are inherited from the API as-is.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use gads_core::CustomerId;

use crate::auth::TokenProvider;
use crate::config::GoogleAdsConfig;
use crate::error::{ApiError, Result};
use crate::request::{
    CreateCustomerClientRequest, GenerateKeywordIdeasRequest, MutateRequest, MutateSingleRequest,
    RecommendationActionRequest, SearchRequest, SearchStreamRequest,
    UploadClickConversionsRequest,
};
use crate::response::{
    CreateCustomerClientResponse, ErrorEnvelope, GenerateKeywordIdeasResponse, GoogleAdsFailure,
    ListAccessibleCustomersResponse, MutateResponse, SearchResponse, SearchStreamBatch,
    UploadClickConversionsResponse,
};

/// REST API version pinned by this client.
pub const API_VERSION: &str = "v20";

/// Shared, stateless handle to the Google Ads REST API.
pub struct GoogleAdsClient {
    config: GoogleAdsConfig,
    tokens: TokenProvider,
    client: reqwest::Client,
}

impl GoogleAdsClient {
    pub fn new(config: GoogleAdsConfig) -> Self {
        let client = reqwest::Client::new();
        let tokens = TokenProvider::new(config.credentials.clone(), client.clone());
        Self {
            config,
            tokens,
            client,
        }
    }

    /// The configured login customer ID, if any.
    pub fn login_customer_id(&self) -> Option<&CustomerId> {
        self.config.login_customer_id.as_ref()
    }

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    /// Build a full API URL from a path below the version segment.
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.base_url, API_VERSION, path)
    }

    /// Attach the bearer token and the Google Ads headers.
    async fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self.tokens.access_token().await?;
        let mut builder = builder
            .bearer_auth(token)
            .header("developer-token", &self.config.developer_token);
        if let Some(login) = &self.config.login_customer_id {
            builder = builder.header("login-customer-id", login.as_str());
        }
        Ok(builder)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        debug!(%url, "google ads POST");
        let request = self.authed(self.client.post(&url)).await?.json(body);
        Self::check_response(request.send().await?).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.api_url(path);
        debug!(%url, "google ads GET");
        let request = self.authed(self.client.get(&url)).await?;
        Self::check_response(request.send().await?).await
    }

    /// Turn the HTTP response into a typed value or an [`ApiError::Status`].
    async fn check_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::status_error(status, &body))
        }
    }

    /// Parse the standard error envelope; degrade to the raw body text when
    /// the envelope does not parse.
    fn status_error(status: reqwest::StatusCode, body: &str) -> ApiError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let failure = GoogleAdsFailure {
                    code: envelope.error.code,
                    message: envelope.error.message.clone(),
                    details: envelope.error.details,
                };
                ApiError::Status {
                    http_code: status.as_u16(),
                    status: envelope.error.status,
                    message: envelope.error.message,
                    failure: Some(failure),
                }
            }
            Err(_) => ApiError::Status {
                http_code: status.as_u16(),
                status: status
                    .canonical_reason()
                    .unwrap_or("UNKNOWN")
                    .to_string(),
                message: if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.to_string()
                },
                failure: None,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Mutate endpoints
    // -----------------------------------------------------------------------

    /// POST `customers/{cid}/{collection}:mutate`.
    pub async fn mutate<R: Serialize>(
        &self,
        customer: &CustomerId,
        collection: &str,
        request: &MutateRequest<R>,
    ) -> Result<MutateResponse> {
        self.post(&format!("customers/{customer}/{collection}:mutate"), request)
            .await
    }

    /// POST mutate for the link services whose verb takes a single
    /// `operation`.
    pub async fn mutate_single<R: Serialize>(
        &self,
        customer: &CustomerId,
        collection: &str,
        request: &MutateSingleRequest<R>,
    ) -> Result<MutateResponse> {
        self.post(&format!("customers/{customer}/{collection}:mutate"), request)
            .await
    }

    // -----------------------------------------------------------------------
    // Search endpoints
    // -----------------------------------------------------------------------

    /// POST `customers/{cid}/googleAds:search`.
    pub async fn search(
        &self,
        customer: &CustomerId,
        request: &SearchRequest,
    ) -> Result<SearchResponse> {
        self.post(&format!("customers/{customer}/googleAds:search"), request)
            .await
    }

    /// POST `customers/{cid}/googleAds:searchStream`.
    ///
    /// The REST rendition of the stream is a JSON array of batches.
    pub async fn search_stream(
        &self,
        customer: &CustomerId,
        request: &SearchStreamRequest,
    ) -> Result<Vec<SearchStreamBatch>> {
        self.post(
            &format!("customers/{customer}/googleAds:searchStream"),
            request,
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Custom verbs
    // -----------------------------------------------------------------------

    /// GET `customers:listAccessibleCustomers`.
    pub async fn list_accessible_customers(&self) -> Result<ListAccessibleCustomersResponse> {
        self.get("customers:listAccessibleCustomers").await
    }

    /// POST `customers/{manager_cid}:createCustomerClient`.
    pub async fn create_customer_client(
        &self,
        manager: &CustomerId,
        request: &CreateCustomerClientRequest,
    ) -> Result<CreateCustomerClientResponse> {
        self.post(
            &format!("customers/{manager}:createCustomerClient"),
            request,
        )
        .await
    }

    /// POST `customers/{cid}:uploadClickConversions`.
    pub async fn upload_click_conversions(
        &self,
        customer: &CustomerId,
        request: &UploadClickConversionsRequest,
    ) -> Result<UploadClickConversionsResponse> {
        self.post(
            &format!("customers/{customer}:uploadClickConversions"),
            request,
        )
        .await
    }

    /// POST `customers/{cid}:generateKeywordIdeas`.
    pub async fn generate_keyword_ideas(
        &self,
        customer: &CustomerId,
        request: &GenerateKeywordIdeasRequest,
    ) -> Result<GenerateKeywordIdeasResponse> {
        self.post(
            &format!("customers/{customer}:generateKeywordIdeas"),
            request,
        )
        .await
    }

    /// POST `customers/{cid}/recommendations:apply`.
    pub async fn apply_recommendations(
        &self,
        customer: &CustomerId,
        request: &RecommendationActionRequest,
    ) -> Result<MutateResponse> {
        self.post(
            &format!("customers/{customer}/recommendations:apply"),
            request,
        )
        .await
    }

    /// POST `customers/{cid}/recommendations:dismiss`.
    pub async fn dismiss_recommendations(
        &self,
        customer: &CustomerId,
        request: &RecommendationActionRequest,
    ) -> Result<MutateResponse> {
        self.post(
            &format!("customers/{customer}/recommendations:dismiss"),
            request,
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::config::{Credentials, DEFAULT_BASE_URL, GoogleAdsConfig};

    use super::*;

    fn test_client() -> GoogleAdsClient {
        GoogleAdsClient::new(GoogleAdsConfig {
            developer_token: "dev-token".to_string(),
            login_customer_id: Some(CustomerId::new("987-654-3210").unwrap()),
            credentials: Credentials::StaticToken {
                access_token: "tok".to_string(),
            },
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[test]
    fn api_url_includes_version() {
        let client = test_client();
        assert_eq!(
            client.api_url("customers:listAccessibleCustomers"),
            "https://googleads.googleapis.com/v20/customers:listAccessibleCustomers"
        );
        assert_eq!(
            client.api_url("customers/1234567890/campaignBudgets:mutate"),
            "https://googleads.googleapis.com/v20/customers/1234567890/campaignBudgets:mutate"
        );
    }

    #[test]
    fn login_customer_id_is_normalized() {
        let client = test_client();
        assert_eq!(
            client.login_customer_id().map(|c| c.as_str()),
            Some("9876543210")
        );
    }

    #[test]
    fn status_error_parses_envelope() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "Request contains an invalid argument.",
                "status": "INVALID_ARGUMENT",
                "details": [{"@type": "type.googleapis.com/google.ads.googleads.v20.errors.GoogleAdsFailure", "errors": []}]
            }
        }"#;
        let err = GoogleAdsClient::status_error(reqwest::StatusCode::BAD_REQUEST, body);

        match err {
            ApiError::Status {
                http_code,
                status,
                message,
                failure,
            } => {
                assert_eq!(http_code, 400);
                assert_eq!(status, "INVALID_ARGUMENT");
                assert_eq!(message, "Request contains an invalid argument.");
                let failure = failure.expect("structured failure");
                assert_eq!(failure.details.len(), 1);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn status_error_message_shape() {
        let body = r#"{"error": {"code": 404, "message": "Resource was not found.", "status": "NOT_FOUND"}}"#;
        let err = GoogleAdsClient::status_error(reqwest::StatusCode::NOT_FOUND, body);
        assert_eq!(
            err.to_string(),
            "Google Ads API error: Resource was not found."
        );
    }

    #[test]
    fn status_error_degrades_to_raw_body() {
        let err = GoogleAdsClient::status_error(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>upstream exploded</html>",
        );
        match err {
            ApiError::Status {
                http_code,
                message,
                failure,
                ..
            } => {
                assert_eq!(http_code, 502);
                assert!(message.contains("upstream exploded"));
                assert!(failure.is_none());
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn status_error_with_empty_body_uses_status_line() {
        let err = GoogleAdsClient::status_error(reqwest::StatusCode::SERVICE_UNAVAILABLE, "");
        match err {
            ApiError::Status { message, .. } => assert!(message.contains("503")),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoogleAdsClient>();
    }
}
