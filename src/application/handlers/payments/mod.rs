//! Payment handlers.
//!
//! ## Commands
//! - Creating hosted checkout sessions
//! - Processing Stripe webhooks

mod create_payment_session;
mod handle_stripe_webhook;

pub use create_payment_session::{CreatePaymentSessionCommand, CreatePaymentSessionHandler};
pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, HandleStripeWebhookResult,
};
