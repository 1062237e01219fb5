//! # checkout-payments
//!
//! Chimoney upstream client and webhook dispatch for chimoney-checkout.
//!
//! ## Hosted Checkout Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Checkout   │────▶│ Chimoney Hosted │────▶│  Checkout   │
//! │    form     │     │  Payment Page   │     │  (success)  │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//!        │                     │
//!        ▼                     ▼
//!  POST /api/payment     POST /webhook
//!     /initiate        (async, at least once)
//! ```
//!
//! The provider is the system of record. This crate only translates
//! requests, normalizes responses into [`UpstreamResult`] and logs webhook
//! events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_payments::{ChimoneyClient, ChimoneyConfig, PaymentInitiationRequest, PaymentProvider};
//!
//! let client = ChimoneyClient::from_config(ChimoneyConfig::from_env())?;
//!
//! let initiation = client.initiate_payment(&PaymentInitiationRequest {
//!     value_in_usd: dec!(10),
//!     payer_email: "payer@example.com".into(),
//!     meta: Default::default(),
//!     redirect_url: Some("https://yoursite.com/".into()),
//! }).await?;
//!
//! // Redirect the payer to: initiation.payment_link
//! ```

mod checkout;
mod client;
mod delivery;
mod error;
mod interledger;
mod upstream;
mod webhook;

pub use checkout::{PaymentInitiation, PaymentInitiationRequest, PaymentVerificationRequest};
pub use client::{ChimoneyClient, ChimoneyConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, PaymentProvider};
pub use delivery::{DEFAULT_CAPACITY, DeliveryKey, DeliveryLog, MemoryDeliveryLog};
pub use error::{PaymentError, Result};
pub use interledger::{InterledgerWallet, PayoutRequest, SubaccountRequest, WalletAddressRequest};
pub use upstream::{Endpoint, Outcome, SuccessConvention, UpstreamResult};
pub use webhook::{WebhookEvent, WebhookEventKind, WebhookHandler, WebhookOutcome};
