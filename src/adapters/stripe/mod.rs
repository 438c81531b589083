//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe's hosted checkout.
//!
//! # Security
//!
//! - The API key is held as a `secrecy::SecretString`
//! - Webhook signatures are verified in `domain::payment::StripeWebhookVerifier`

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{StripeApiError, StripeCheckoutSession, StripeErrorResponse};
pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
