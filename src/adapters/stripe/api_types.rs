//! Stripe API response types.
//!
//! Only the fields this service reads are captured; Stripe adds fields
//! freely, so everything else is ignored on deserialization.

use serde::Deserialize;

/// Checkout session as returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted checkout page URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Success URL for redirect after checkout.
    #[serde(default)]
    pub success_url: Option<String>,

    /// Cancel URL for redirect if checkout is abandoned.
    #[serde(default)]
    pub cancel_url: Option<String>,
}

/// Error body returned by the Stripe API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error category (invalid_request_error, api_error, ...).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Machine-readable code (parameter_invalid_empty, ...).
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
