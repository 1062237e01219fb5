//! Response Envelope
//!
//! Every API response body has the shape `{status, message, data, code}`,
//! with absent fields omitted. `code` always mirrors the HTTP status.

use axum::{http::StatusCode, Json};
use checkout_payments::UpstreamResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code plus envelope, as returned by every handler
pub type ApiResponse = (StatusCode, Json<Envelope>);

/// Success and failure messages for one operation
#[derive(Clone, Copy, Debug)]
pub struct Messages {
    pub success: &'static str,
    pub failure: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl Envelope {
    /// 200 on upstream success, 400 on upstream failure
    pub fn from_upstream(result: &UpstreamResult, messages: Messages) -> ApiResponse {
        let (code, message) = if result.success {
            (StatusCode::OK, messages.success)
        } else {
            (StatusCode::BAD_REQUEST, messages.failure)
        };

        respond(
            code,
            Self {
                status: Some(result.outcome().as_str().into()),
                message: Some(message.into()),
                data: result.data(),
                code: Some(code.as_u16()),
            },
        )
    }

    /// 200 whenever the upstream answered; `status` carries its outcome
    pub fn lookup(result: &UpstreamResult) -> ApiResponse {
        respond(
            StatusCode::OK,
            Self {
                status: Some(result.outcome().as_str().into()),
                data: result.data(),
                code: Some(StatusCode::OK.as_u16()),
                ..Default::default()
            },
        )
    }

    /// 400 with only a message, for transport and request-shape errors
    pub fn error(message: impl Into<String>) -> ApiResponse {
        respond(
            StatusCode::BAD_REQUEST,
            Self {
                message: Some(message.into()),
                ..Default::default()
            },
        )
    }

    /// 400 with `status: "error"`, used by the Interledger endpoints
    pub fn error_with_status(message: impl Into<String>) -> ApiResponse {
        respond(
            StatusCode::BAD_REQUEST,
            Self {
                status: Some("error".into()),
                message: Some(message.into()),
                ..Default::default()
            },
        )
    }

    /// Webhook acknowledgement
    pub fn acknowledged() -> ApiResponse {
        respond(
            StatusCode::OK,
            Self {
                status: Some("success".into()),
                code: Some(StatusCode::OK.as_u16()),
                ..Default::default()
            },
        )
    }

    /// Webhook acknowledgement after an internal failure. Still 200, so the
    /// provider does not resend.
    pub fn webhook_failed() -> ApiResponse {
        respond(
            StatusCode::OK,
            Self {
                message: Some("failed".into()),
                ..Default::default()
            },
        )
    }
}

fn respond(code: StatusCode, envelope: Envelope) -> ApiResponse {
    (code, Json(envelope))
}
