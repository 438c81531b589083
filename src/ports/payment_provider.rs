//! Payment provider port for external payment processing.
//!
//! Defines the contract for the hosted-checkout call made to the
//! payment processor (Stripe). Webhook verification is local crypto and
//! lives in the domain instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{CheckoutResult, CheckoutSessionParams, PaymentSessionError};

/// Port for payment provider integrations.
///
/// Implementations make a single attempt per call; retries are the
/// caller's decision.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment-mode hosted checkout session.
    ///
    /// Returns the processor's redirect URLs for the session.
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> Result<CheckoutResult, PaymentError>;
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create a generic provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for PaymentSessionError {
    fn from(err: PaymentError) -> Self {
        match err.code {
            PaymentErrorCode::InvalidRequest => PaymentSessionError::Rejected(err.message),
            PaymentErrorCode::AuthenticationError => {
                PaymentSessionError::Authentication(err.message)
            }
            PaymentErrorCode::NetworkError | PaymentErrorCode::ProviderError => {
                PaymentSessionError::Unavailable(err.message)
            }
        }
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Request rejected by the provider (4xx).
    InvalidRequest,

    /// Provider API error (5xx or unparseable response).
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
