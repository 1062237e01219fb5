//! Router

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    create_subaccount, health_check, initiate_payment, initiate_payout, issue_wallet_address,
    liveness, receive_webhook, verify_payment,
};
use crate::state::AppState;

/// Method, path and description of every route, for the startup banner
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Liveness"),
    ("GET", "/health", "Health check"),
    ("POST", "/api/payment/initiate", "Initiate payment"),
    ("POST", "/api/payment/verify", "Verify payment"),
    ("POST", "/api/interledger/subaccount", "Create sub-account"),
    ("POST", "/api/interledger/wallet-address", "Issue wallet address"),
    ("POST", "/api/interledger/payout", "Interledger payout"),
    ("POST", "/webhook", "Chimoney webhook"),
];

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/", get(liveness))
        .route("/health", get(health_check))

        // Payments
        .route("/api/payment/initiate", post(initiate_payment))
        .route("/api/payment/verify", post(verify_payment))

        // Interledger
        .route("/api/interledger/subaccount", post(create_subaccount))
        .route("/api/interledger/wallet-address", post(issue_wallet_address))
        .route("/api/interledger/payout", post(initiate_payout))

        // Provider callbacks
        .route("/webhook", post(receive_webhook))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
