//! Data Transfer Objects for the payments HTTP endpoints.
//!
//! The checkout request and result bodies are the domain types themselves
//! (`PaymentSessionRequest`, `CheckoutResult`); only the extra response
//! shapes live here.

use serde::{Deserialize, Serialize};

/// Webhook acknowledgement echoing the received signature header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub sig: String,
}

/// Body for the checkout redirect landing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectLandingResponse {
    pub ok: bool,
    pub message: String,
}

impl RedirectLandingResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            message: "Payment successful".to_string(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            ok: false,
            message: "Payment cancelled".to_string(),
        }
    }
}

/// Liveness check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
