//! API Client

use serde::Deserialize;
use serde_json::Value;

/// Checkout server API root, overridable at build time
pub const API_BASE: &str = match option_env!("CHECKOUT_API_BASE") {
    Some(base) => base,
    None => "http://localhost:3000/api",
};

/// Response envelope from the checkout server
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub code: Option<u16>,
}

impl Envelope {
    /// Payment link from a successful initiate response
    pub fn payment_link(&self) -> Result<String, String> {
        if self.code != Some(200) || self.status.as_deref() != Some("success") {
            return Err(self
                .message
                .clone()
                .unwrap_or_else(|| "Payment initiation failed".into()));
        }

        self.data
            .as_ref()
            .and_then(|d| d.get("paymentLink"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "No payment link returned".into())
    }
}

/// Where the provider should send the payer back to
pub fn redirect_url() -> String {
    web_sys::window()
        .and_then(|w| {
            let location = w.location();
            Some(format!("{}{}", location.origin().ok()?, location.pathname().ok()?))
        })
        .unwrap_or_else(|| "http://localhost:5173".into())
}

/// Ask the server to initiate a payment; returns the hosted payment link
pub async fn initiate_payment(body: &Value) -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{API_BASE}/payment/initiate"))
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let envelope: Envelope = response.json().await.map_err(|e| e.to_string())?;
    envelope.payment_link()
}
