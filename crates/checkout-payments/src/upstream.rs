//! Upstream Result Normalization
//!
//! The two Chimoney endpoint families disagree on how they report success:
//! the payment endpoints embed `"status": "success"` in the body, while the
//! sub-account and Interledger endpoints rely on the HTTP status code. Every
//! call is funnelled through [`Endpoint`] so callers only ever look at
//! [`UpstreamResult::success`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an endpoint reports success
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessConvention {
    /// Body carries `"status": "success"`
    EmbeddedStatus,

    /// Any 2xx HTTP status
    HttpStatus,
}

/// Upstream endpoints this service talks to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    InitiatePayment,
    VerifyPayment,
    CreateSubaccount,
    IssueWalletAddress,
    InterledgerPayout,
}

impl Endpoint {
    /// Path relative to the provider base URL
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::InitiatePayment => "v0.2/payment/initiate",
            Endpoint::VerifyPayment => "v0.2/payment/verify",
            Endpoint::CreateSubaccount => "v0.2/sub_account/create",
            Endpoint::IssueWalletAddress => "v0.2/accounts/issue_wallet_address",
            Endpoint::InterledgerPayout => "v0.2/payouts/interledger-wallet-address",
        }
    }

    pub fn convention(self) -> SuccessConvention {
        match self {
            Endpoint::InitiatePayment | Endpoint::VerifyPayment => SuccessConvention::EmbeddedStatus,
            Endpoint::CreateSubaccount
            | Endpoint::IssueWalletAddress
            | Endpoint::InterledgerPayout => SuccessConvention::HttpStatus,
        }
    }

    /// Decide whether a response counts as success for this endpoint
    pub fn is_success(self, http_status: u16, body: &Value) -> bool {
        match self.convention() {
            SuccessConvention::EmbeddedStatus => {
                body.get("status").and_then(Value::as_str) == Some("success")
            }
            SuccessConvention::HttpStatus => (200..300).contains(&http_status),
        }
    }
}

/// Outcome label used in response envelopes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failed => "failed",
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success { Outcome::Success } else { Outcome::Failed }
    }
}

/// A parsed upstream response with its success flag already decided
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpstreamResult {
    /// Endpoint that produced this response
    pub endpoint: Endpoint,

    /// HTTP status returned by the provider
    pub http_status: u16,

    /// Success according to the endpoint's convention
    pub success: bool,

    /// Raw JSON body
    pub body: Value,
}

impl UpstreamResult {
    pub fn new(endpoint: Endpoint, http_status: u16, body: Value) -> Self {
        Self {
            endpoint,
            http_status,
            success: endpoint.is_success(http_status, &body),
            body,
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from(self.success)
    }

    /// Payload handed back to API callers.
    ///
    /// The payment family wraps its payload in `data`; the Interledger family
    /// returns it as the whole body.
    pub fn data(&self) -> Option<Value> {
        match self.endpoint.convention() {
            SuccessConvention::EmbeddedStatus => self.body.get("data").cloned(),
            SuccessConvention::HttpStatus => Some(self.body.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_status_ignores_http_code() {
        let body = json!({"status": "success", "data": {"paymentLink": "http://pay"}});
        let result = UpstreamResult::new(Endpoint::InitiatePayment, 201, body);
        assert!(result.success);

        let body = json!({"status": "error", "error": "invalid email"});
        let result = UpstreamResult::new(Endpoint::InitiatePayment, 200, body);
        assert!(!result.success);
        assert_eq!(result.outcome(), Outcome::Failed);
    }

    #[test]
    fn test_http_status_ignores_body() {
        let body = json!({"status": "error"});
        assert!(UpstreamResult::new(Endpoint::CreateSubaccount, 200, body).success);

        let body = json!({"status": "success"});
        assert!(!UpstreamResult::new(Endpoint::InterledgerPayout, 422, body).success);
    }

    #[test]
    fn test_data_per_family() {
        let body = json!({"status": "success", "data": {"issueID": "abc"}});
        let result = UpstreamResult::new(Endpoint::VerifyPayment, 200, body.clone());
        assert_eq!(result.data(), Some(json!({"issueID": "abc"})));

        let result = UpstreamResult::new(Endpoint::IssueWalletAddress, 200, body.clone());
        assert_eq!(result.data(), Some(body));

        let result = UpstreamResult::new(Endpoint::InitiatePayment, 400, json!({"status": "error"}));
        assert_eq!(result.data(), None);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::InitiatePayment.path(), "v0.2/payment/initiate");
        assert_eq!(
            Endpoint::InterledgerPayout.path(),
            "v0.2/payouts/interledger-wallet-address"
        );
    }
}
