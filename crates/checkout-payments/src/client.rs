//! Chimoney API Client
//!
//! Implementation of `PaymentProvider` over the Chimoney REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::checkout::{PaymentInitiation, PaymentInitiationRequest, PaymentVerificationRequest};
use crate::error::{PaymentError, Result};
use crate::interledger::{PayoutRequest, SubaccountRequest, WalletAddressRequest};
use crate::upstream::{Endpoint, UpstreamResult};

/// Sandbox base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api-v2-sandbox.chimoney.io/";

/// Placeholder key; the sandbox rejects it, but the server still starts
pub const DEFAULT_API_KEY: &str = "0000";

const API_KEY_HEADER: &str = "X-API-KEY";

/// Payment provider trait (Strategy pattern)
///
/// Every operation is a single request/response against the provider. A
/// business-level rejection comes back as `Ok` with `success == false`;
/// only transport and decoding failures are `Err`.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start a hosted payment and obtain the payment link
    async fn initiate_payment(&self, request: &PaymentInitiationRequest) -> Result<PaymentInitiation>;

    /// Look up the state of a payment
    async fn verify_payment(&self, request: &PaymentVerificationRequest) -> Result<UpstreamResult>;

    /// Create an Interledger-enabled sub-account
    async fn create_subaccount(&self, request: &SubaccountRequest) -> Result<UpstreamResult>;

    /// Issue an Interledger wallet address for a user
    async fn issue_wallet_address(&self, request: &WalletAddressRequest) -> Result<UpstreamResult>;

    /// Pay out to Interledger wallet addresses
    async fn initiate_payout(&self, request: &PayoutRequest) -> Result<UpstreamResult>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Chimoney client configuration
#[derive(Clone)]
pub struct ChimoneyConfig {
    /// API base URL, with or without a trailing slash
    pub base_url: String,

    /// Value sent in the `X-API-KEY` header
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ChimoneyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChimoneyConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ChimoneyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: DEFAULT_API_KEY.into(),
            timeout_secs: 10,
        }
    }
}

impl ChimoneyConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("CHIMONEY_API_URL").unwrap_or(defaults.base_url);
        let api_key = std::env::var("API_KEY").unwrap_or(defaults.api_key);
        let timeout_secs = std::env::var("CHIMONEY_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }

    /// Whether the placeholder key is still in use
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

/// Chimoney payment provider
pub struct ChimoneyClient {
    http: reqwest::Client,
    config: ChimoneyConfig,
}

impl ChimoneyClient {
    /// Create from configuration
    pub fn from_config(config: ChimoneyConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint.path())
    }

    /// POST a JSON body and normalize the response
    async fn post<T>(&self, endpoint: Endpoint, body: &T) -> Result<UpstreamResult>
    where
        T: Serialize + Sync + ?Sized,
    {
        let url = self.url(endpoint);
        tracing::debug!(?endpoint, %url, "Calling Chimoney");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::from_transport(e, self.config.timeout_secs))?;

        let http_status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::from_transport(e, self.config.timeout_secs))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(?endpoint, http_status, error = %e, "Chimoney returned non-JSON body");
            PaymentError::InvalidResponse(e.to_string())
        })?;

        let result = UpstreamResult::new(endpoint, http_status, body);
        if result.success {
            tracing::debug!(?endpoint, http_status, "Chimoney call succeeded");
        } else {
            tracing::warn!(?endpoint, http_status, "Chimoney reported failure");
        }

        Ok(result)
    }
}

#[async_trait]
impl PaymentProvider for ChimoneyClient {
    async fn initiate_payment(&self, request: &PaymentInitiationRequest) -> Result<PaymentInitiation> {
        self.post(Endpoint::InitiatePayment, request)
            .await
            .map(PaymentInitiation::from)
    }

    async fn verify_payment(&self, request: &PaymentVerificationRequest) -> Result<UpstreamResult> {
        self.post(Endpoint::VerifyPayment, request).await
    }

    async fn create_subaccount(&self, request: &SubaccountRequest) -> Result<UpstreamResult> {
        self.post(Endpoint::CreateSubaccount, request).await
    }

    async fn issue_wallet_address(&self, request: &WalletAddressRequest) -> Result<UpstreamResult> {
        self.post(Endpoint::IssueWalletAddress, request).await
    }

    async fn initiate_payout(&self, request: &PayoutRequest) -> Result<UpstreamResult> {
        self.post(Endpoint::InterledgerPayout, request).await
    }

    fn name(&self) -> &str {
        "Chimoney"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> ChimoneyClient {
        ChimoneyClient::from_config(ChimoneyConfig {
            base_url: format!("{}/", server.url()),
            api_key: "test-key".into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn initiation_request() -> PaymentInitiationRequest {
        PaymentInitiationRequest {
            value_in_usd: dec!(1),
            payer_email: "a@b.com".into(),
            meta: serde_json::Map::new(),
            redirect_url: Some("http://x".into()),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ChimoneyConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.uses_placeholder_key());
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ChimoneyConfig {
            api_key: "sk_live_secret".into(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("sk_live_secret"));
    }

    #[test]
    fn test_url_join() {
        let client = ChimoneyClient::from_config(ChimoneyConfig {
            base_url: "https://api.example.com".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.url(Endpoint::VerifyPayment),
            "https://api.example.com/v0.2/payment/verify"
        );
    }

    #[tokio::test]
    async fn test_initiate_sends_key_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v0.2/payment/initiate")
            .match_header("x-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "payerEmail": "a@b.com",
                "redirect_url": "http://x",
                "meta": {},
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success","data":{"paymentLink":"http://pay","issueID":"abc123"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let initiation = client.initiate_payment(&initiation_request()).await.unwrap();

        mock.assert_async().await;
        assert!(initiation.is_success());
        assert_eq!(initiation.payment_link.as_deref(), Some("http://pay"));
        assert_eq!(initiation.issue_id(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_initiate_embedded_failure_is_ok_with_failed_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v0.2/payment/initiate")
            .with_status(400)
            .with_body(r#"{"status":"error","error":"payerEmail is required"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let initiation = client.initiate_payment(&initiation_request()).await.unwrap();

        assert!(!initiation.is_success());
        assert_eq!(initiation.upstream.http_status, 400);
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v0.2/payment/verify")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .verify_payment(&PaymentVerificationRequest { id: "abc123".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_interledger_uses_http_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v0.2/accounts/issue_wallet_address")
            .match_body(Matcher::Json(json!({"userID": "u1", "ilpUsername": "ada"})))
            .with_status(200)
            .with_body(r#"{"walletAddress":"$ilp.chimoney.io/ada"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/v0.2/sub_account/create")
            .with_status(409)
            .with_body(r#"{"status":"success","error":"email already exists"}"#)
            .create_async()
            .await;

        let client = client_for(&server);

        let issued = client
            .issue_wallet_address(&WalletAddressRequest {
                user_id: "u1".into(),
                ilp_username: "ada".into(),
            })
            .await
            .unwrap();
        assert!(issued.success);
        assert_eq!(issued.data(), Some(json!({"walletAddress": "$ilp.chimoney.io/ada"})));

        let created = client
            .create_subaccount(&SubaccountRequest {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                phone_number: "+2348000000000".into(),
                meta: serde_json::Map::new(),
            })
            .await
            .unwrap();
        assert!(!created.success);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let client = ChimoneyClient::from_config(ChimoneyConfig {
            base_url: "http://127.0.0.1:1".into(),
            api_key: "test-key".into(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client
            .verify_payment(&PaymentVerificationRequest { id: "abc123".into() })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
