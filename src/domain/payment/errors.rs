//! Error types for checkout session creation and webhook handling.
//!
//! Both carry an HTTP status mapping that the HTTP adapter
//! uses when turning them into responses.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors from creating a checkout session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentSessionError {
    /// The request failed local validation; the processor was not called.
    #[error("Invalid payment session request: {0}")]
    InvalidRequest(String),

    /// The processor rejected the request (bad currency, bad params).
    #[error("Payment processor rejected the request: {0}")]
    Rejected(String),

    /// The processor refused our API credentials.
    #[error("Payment processor authentication failed: {0}")]
    Authentication(String),

    /// The processor could not be reached or answered unexpectedly.
    #[error("Payment processor unavailable: {0}")]
    Unavailable(String),
}

impl PaymentSessionError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentSessionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PaymentSessionError::Rejected(_) | PaymentSessionError::Unavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            PaymentSessionError::Authentication(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code for the JSON error body.
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentSessionError::InvalidRequest(_) => "VALIDATION_FAILED",
            PaymentSessionError::Rejected(_) => "PAYMENT_PROVIDER_REJECTED",
            PaymentSessionError::Authentication(_) => "PAYMENT_PROVIDER_AUTH",
            PaymentSessionError::Unavailable(_) => "PAYMENT_PROVIDER_UNAVAILABLE",
        }
    }
}

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// Signature, timestamp or envelope did not check out.
    ///
    /// Every failure before dispatch lands here; the reason is for logs only.
    #[error("Webhook signature verification failed: {0}")]
    SignatureVerificationFailed(String),

    /// The verified event could not be forwarded to the message channel.
    #[error("Failed to publish {topic}: {reason}")]
    PublishFailed { topic: &'static str, reason: String },
}

impl WebhookError {
    pub fn verification(reason: impl Into<String>) -> Self {
        Self::SignatureVerificationFailed(reason.into())
    }

    /// Returns true if Stripe should redeliver this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::PublishFailed { .. })
    }

    /// Maps the error to an appropriate HTTP status code.
    ///
    /// Status codes determine Stripe's retry behavior:
    /// - 4xx: delivery rejected
    /// - 5xx: Stripe retries with backoff
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SignatureVerificationFailed(_) => StatusCode::BAD_REQUEST,
            WebhookError::PublishFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
