//! Hosted Checkout Payments
//!
//! Request and result types for the Chimoney payment endpoints. The provider
//! hosts the payment page; this service only obtains the link to it and lets
//! the browser navigate there.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::upstream::{Outcome, UpstreamResult};

/// Request to initiate a payment
///
/// Deserializing normalizes the caller's body before it is forwarded: fields
/// other than these four are dropped, `valueInUSD` is sent as a JSON number
/// even when it arrived as a string, and a missing `valueInUSD` or
/// `payerEmail` (or a non-object `meta`) is rejected locally instead of by the
/// provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentInitiationRequest {
    /// Amount to charge, in US dollars
    #[serde(rename = "valueInUSD")]
    pub value_in_usd: Decimal,

    /// Payer email
    #[serde(rename = "payerEmail")]
    pub payer_email: String,

    /// Arbitrary metadata forwarded verbatim
    #[serde(default)]
    pub meta: Map<String, Value>,

    /// URL the provider sends the browser back to
    #[serde(alias = "redirectUrl", default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Request to verify a payment by its provider ID
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerificationRequest {
    pub id: String,
}

/// Result of initiating a payment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentInitiation {
    /// Whether the provider accepted the payment request
    pub status: Outcome,

    /// Hosted payment page to redirect the payer to
    #[serde(rename = "paymentLink")]
    pub payment_link: Option<String>,

    /// Provider response this was derived from
    pub upstream: UpstreamResult,
}

impl From<UpstreamResult> for PaymentInitiation {
    fn from(upstream: UpstreamResult) -> Self {
        let payment_link = upstream
            .data()
            .as_ref()
            .and_then(|d| d.get("paymentLink"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            status: upstream.outcome(),
            payment_link,
            upstream,
        }
    }
}

impl PaymentInitiation {
    pub fn is_success(&self) -> bool {
        self.status == Outcome::Success
    }

    /// Provider issue ID, when the response carries one
    pub fn issue_id(&self) -> Option<&str> {
        self.upstream
            .body
            .get("data")
            .and_then(|d| d.get("issueID"))
            .and_then(Value::as_str)
    }
}
