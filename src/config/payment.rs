//! Payment configuration

use reqwest::Url;
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_secret: String,

    /// Stripe webhook endpoint signing secret
    pub stripe_endpoint_secret: String,

    /// Redirect target after a completed checkout
    pub stripe_success_url: String,

    /// Redirect target after an abandoned checkout
    pub stripe_cancel_url: String,

    /// Override for the Stripe API host (tests, stripe-mock)
    #[serde(default)]
    pub stripe_api_base_url: Option<String>,

    /// Accepted webhook timestamp age in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub stripe_webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret.starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET"));
        }
        if self.stripe_endpoint_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_ENDPOINT_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_secret.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_endpoint_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        validate_redirect_url(&self.stripe_success_url, "STRIPE_SUCCESS_URL")?;
        validate_redirect_url(&self.stripe_cancel_url, "STRIPE_CANCEL_URL")?;

        if let Some(base) = &self.stripe_api_base_url {
            if !is_http_url(base) {
                return Err(ValidationError::InvalidStripeBaseUrl);
            }
        }

        Ok(())
    }
}

fn validate_redirect_url(value: &str, name: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !is_http_url(value) {
        return Err(ValidationError::InvalidRedirectUrl(name));
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn default_webhook_tolerance() -> i64 {
    300
}
