//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API
//! using form-encoded requests and basic auth, as Stripe expects.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::payment::{CheckoutResult, CheckoutSessionParams};
use crate::ports::{PaymentError, PaymentProvider};

use super::api_types::{StripeCheckoutSession, StripeErrorResponse};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Build from the validated application payment config.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        let stripe = Self::new(config.stripe_secret.clone());
        match &config.stripe_api_base_url {
            Some(url) => stripe.with_base_url(url.clone()),
            None => stripe,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Stripe payment provider adapter.
///
/// Holds one `reqwest::Client` for the process; it is safe to share
/// across concurrent requests.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Encodes checkout params as Stripe's bracketed form fields.
fn checkout_form_params(params: &CheckoutSessionParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
        (
            "payment_intent_data[metadata][orderId]".to_string(),
            params.order_id.clone(),
        ),
    ];

    for (i, item) in params.line_items.iter().enumerate() {
        form.push((
            format!("line_items[{i}][price_data][currency]"),
            item.currency.clone(),
        ));
        form.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        form.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        form.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    form
}

/// Maps a non-2xx Stripe response to a `PaymentError`.
fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error ({status}): {body}"));

    let error = if status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
    {
        PaymentError::authentication(message)
    } else if status.is_client_error() {
        PaymentError::invalid_request(message)
    } else {
        PaymentError::provider(message)
    };

    // Errors without a specific code still carry their type
    match parsed.and_then(|b| b.error.code.or(b.error.error_type)) {
        Some(code) => error.with_provider_code(code),
        None => error,
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> Result<CheckoutResult, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let form = checkout_form_params(&params);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &error_text);
            tracing::error!(
                order_id = %params.order_id,
                status = status.as_u16(),
                error = %error,
                "Stripe create_checkout_session failed"
            );
            return Err(error);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        tracing::info!(
            order_id = %params.order_id,
            session_id = %session.id,
            line_items = params.line_items.len(),
            "Stripe checkout session created"
        );

        Ok(CheckoutResult {
            url: session.url,
            success_url: session.success_url,
            cancel_url: session.cancel_url,
        })
    }
}
