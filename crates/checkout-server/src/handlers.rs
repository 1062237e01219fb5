//! HTTP Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use checkout_payments::{
    PaymentInitiationRequest, PaymentVerificationRequest, PayoutRequest, Result as PaymentResult,
    SubaccountRequest, UpstreamResult, WalletAddressRequest, WebhookEvent, WebhookOutcome,
};

use crate::envelope::{ApiResponse, Envelope, Messages};
use crate::state::AppState;

// ============================================================================
// Messages
// ============================================================================

const INITIATE: Messages = Messages {
    success: "payment initated successful",
    failure: "payment initation failed",
};

const SUBACCOUNT: Messages = Messages {
    success: "Subaccount created successfully",
    failure: "Subaccount creation failed",
};

const WALLET_ADDRESS: Messages = Messages {
    success: "Interledger wallet address issued successfully",
    failure: "Failed to issue Interledger wallet address",
};

const PAYOUT: Messages = Messages {
    success: "Interledger payout initiated successfully",
    failure: "Interledger payout initiation failed",
};

/// Largest webhook body read before answering `{message:"failed"}`
pub const WEBHOOK_BODY_LIMIT: usize = 1024 * 1024;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Liveness probe
pub async fn liveness() -> &'static str {
    "chimoney-checkout is running"
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
    })
}

/// Initiate a hosted payment
pub async fn initiate_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentInitiationRequest>, JsonRejection>,
) -> ApiResponse {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected payment initiation body");
            return Envelope::error(rejection.body_text());
        }
    };

    match state.provider.initiate_payment(&request).await {
        Ok(initiation) => {
            tracing::info!(
                status = initiation.status.as_str(),
                issue_id = ?initiation.issue_id(),
                payment_link = ?initiation.payment_link,
                "Payment initiation forwarded"
            );
            Envelope::from_upstream(&initiation.upstream, INITIATE)
        }
        Err(e) => {
            tracing::error!(error = %e, retryable = e.is_retryable(), "Payment initiation error");
            Envelope::error(e.user_message())
        }
    }
}

/// Verify a payment by ID
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentVerificationRequest>, JsonRejection>,
) -> ApiResponse {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return Envelope::error(rejection.body_text()),
    };

    match state.provider.verify_payment(&request).await {
        Ok(result) => {
            tracing::info!(id = %request.id, status = result.outcome().as_str(), "Payment verified");
            Envelope::lookup(&result)
        }
        Err(e) => {
            tracing::error!(
                id = %request.id,
                error = %e,
                retryable = e.is_retryable(),
                "Payment verification error"
            );
            Envelope::error(e.user_message())
        }
    }
}

/// Create an Interledger-enabled sub-account
pub async fn create_subaccount(
    State(state): State<AppState>,
    payload: Result<Json<SubaccountRequest>, JsonRejection>,
) -> ApiResponse {
    match payload {
        Ok(Json(request)) => interledger_reply(state.provider.create_subaccount(&request).await, SUBACCOUNT),
        Err(rejection) => Envelope::error_with_status(rejection.body_text()),
    }
}

/// Issue an Interledger wallet address
pub async fn issue_wallet_address(
    State(state): State<AppState>,
    payload: Result<Json<WalletAddressRequest>, JsonRejection>,
) -> ApiResponse {
    match payload {
        Ok(Json(request)) => {
            interledger_reply(state.provider.issue_wallet_address(&request).await, WALLET_ADDRESS)
        }
        Err(rejection) => Envelope::error_with_status(rejection.body_text()),
    }
}

/// Pay out to Interledger wallet addresses
pub async fn initiate_payout(
    State(state): State<AppState>,
    payload: Result<Json<PayoutRequest>, JsonRejection>,
) -> ApiResponse {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return Envelope::error_with_status(rejection.body_text()),
    };

    tracing::info!(
        recipients = request.interledger_wallets.len(),
        total_usd = %request.total_usd(),
        "Forwarding Interledger payout"
    );

    interledger_reply(state.provider.initiate_payout(&request).await, PAYOUT)
}

fn interledger_reply(result: PaymentResult<UpstreamResult>, messages: Messages) -> ApiResponse {
    match result {
        Ok(upstream) => Envelope::from_upstream(&upstream, messages),
        Err(e) => {
            tracing::error!(error = %e, retryable = e.is_retryable(), "Interledger request error");
            Envelope::error_with_status(e.user_message())
        }
    }
}

/// Chimoney webhook receiver.
///
/// Always answers 200 so the provider never retries a delivery this service
/// cannot process idempotently. The body is read here rather than through the
/// `Bytes` extractor, so an oversized delivery gets `{message:"failed"}`
/// instead of a 413 from the router's default body limit.
pub async fn receive_webhook(State(state): State<AppState>, body: Body) -> ApiResponse {
    let body = match axum::body::to_bytes(body, WEBHOOK_BODY_LIMIT).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, limit = WEBHOOK_BODY_LIMIT, "Webhook body unreadable");
            return Envelope::webhook_failed();
        }
    };

    tracing::debug!(bytes = body.len(), "Webhook received");

    let outcome = WebhookEvent::from_slice(&body).and_then(|event| state.webhooks.handle(&event));

    match outcome {
        Ok(WebhookOutcome::Dispatched(_) | WebhookOutcome::Duplicate { .. }) => Envelope::acknowledged(),
        Err(e) => {
            tracing::error!(error = %e, "Webhook processing failed");
            Envelope::webhook_failed()
        }
    }
}
