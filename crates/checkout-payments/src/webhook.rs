//! Chimoney Webhook Handling
//!
//! Parses webhook notifications and dispatches them on their event kind.
//! Dispatch only logs; nothing is stored beyond the delivery log.
//!
//! Senders are not authenticated. Anything reachable from the internet should
//! verify the provider's signature before calling [`WebhookHandler::handle`].

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

use crate::delivery::{DeliveryKey, DeliveryLog};
use crate::error::{PaymentError, Result};

/// Known webhook event kinds
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WebhookEventKind {
    /// `chimoney.payment.completed`: wallet payment confirmed
    PaymentCompleted,

    /// `charge.card.completed`: card payment confirmed
    CardChargeCompleted,

    /// `payout.wallet.completed`: payout from wallet completed
    WalletPayoutCompleted,

    /// `chimoney.payment.failed`: card payment failed. Rarely delivered,
    /// since the card processor reports most failures to the payer directly.
    PaymentFailed,

    /// `chimoney.redeem.completed`: redemption completed
    RedeemCompleted,

    /// Anything else, including a missing `eventType`
    Unknown(String),
}

impl WebhookEventKind {
    pub fn parse(event_type: &str) -> Self {
        match event_type {
            "chimoney.payment.completed" => WebhookEventKind::PaymentCompleted,
            "charge.card.completed" => WebhookEventKind::CardChargeCompleted,
            "payout.wallet.completed" => WebhookEventKind::WalletPayoutCompleted,
            "chimoney.payment.failed" => WebhookEventKind::PaymentFailed,
            "chimoney.redeem.completed" => WebhookEventKind::RedeemCompleted,
            other => WebhookEventKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventKind::PaymentCompleted => "chimoney.payment.completed",
            WebhookEventKind::CardChargeCompleted => "charge.card.completed",
            WebhookEventKind::WalletPayoutCompleted => "payout.wallet.completed",
            WebhookEventKind::PaymentFailed => "chimoney.payment.failed",
            WebhookEventKind::RedeemCompleted => "chimoney.redeem.completed",
            WebhookEventKind::Unknown(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WebhookEventKind::Unknown(_))
    }
}

impl std::fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed webhook notification
#[derive(Clone, Debug, PartialEq)]
pub struct WebhookEvent {
    pub kind: WebhookEventKind,

    /// Provider issue ID the event refers to
    pub issue_id: Option<String>,

    /// Full notification body
    pub payload: Value,
}

impl WebhookEvent {
    /// Parse a raw request body.
    ///
    /// The body must be a JSON object. Missing or non-string `eventType`
    /// yields [`WebhookEventKind::Unknown`] rather than an error.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|e| PaymentError::WebhookParse(e.to_string()))?;

        let Some(fields) = payload.as_object() else {
            return Err(PaymentError::WebhookParse("body is not a JSON object".into()));
        };

        let kind = match fields.get("eventType") {
            Some(Value::String(event_type)) => WebhookEventKind::parse(event_type),
            Some(Value::Null) | None => WebhookEventKind::Unknown(String::new()),
            Some(other) => WebhookEventKind::Unknown(other.to_string()),
        };

        let issue_id = fields
            .get("issueID")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            kind,
            issue_id,
            payload,
        })
    }

    /// Delivery identity, when the event names an issue
    pub fn delivery_key(&self) -> Option<DeliveryKey> {
        self.issue_id
            .as_ref()
            .map(|issue_id| DeliveryKey::new(issue_id.clone(), self.kind.as_str()))
    }
}

/// What the handler did with an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event was dispatched on its kind
    Dispatched(WebhookEventKind),

    /// Same issue and event type were already dispatched
    Duplicate {
        key: DeliveryKey,
        first_seen: DateTime<Utc>,
    },
}

/// Webhook handler
pub struct WebhookHandler<S: DeliveryLog> {
    deliveries: Arc<S>,
}

impl<S: DeliveryLog> WebhookHandler<S> {
    pub fn new(deliveries: Arc<S>) -> Self {
        Self { deliveries }
    }

    pub fn deliveries(&self) -> &S {
        &self.deliveries
    }

    /// Process a webhook event
    pub fn handle(&self, event: &WebhookEvent) -> Result<WebhookOutcome> {
        tracing::info!(
            event_type = %event.kind,
            issue_id = ?event.issue_id,
            "Processing Chimoney webhook"
        );

        if let Some(key) = event.delivery_key() {
            if let Some(first_seen) = self.deliveries.record(&key)? {
                tracing::info!(
                    delivery = %key,
                    first_seen = %first_seen,
                    "Ignoring redelivered webhook"
                );
                return Ok(WebhookOutcome::Duplicate { key, first_seen });
            }
        }

        let issue_id = event.issue_id.as_deref().unwrap_or_default();

        match &event.kind {
            WebhookEventKind::PaymentCompleted => {
                tracing::info!(issue_id = %issue_id, "Payment completed");
            }

            WebhookEventKind::CardChargeCompleted => {
                tracing::info!(issue_id = %issue_id, "Card payment completed");
            }

            WebhookEventKind::WalletPayoutCompleted => {
                tracing::info!(issue_id = %issue_id, "Payout from wallet completed");
            }

            WebhookEventKind::PaymentFailed => {
                tracing::warn!(issue_id = %issue_id, "Payment failed");
            }

            WebhookEventKind::RedeemCompleted => {
                tracing::info!(issue_id = %issue_id, "Redeem completed");
            }

            WebhookEventKind::Unknown(event_type) => {
                tracing::debug!(event_type = %event_type, "Unhandled webhook event");
            }
        }

        Ok(WebhookOutcome::Dispatched(event.kind.clone()))
    }
}
