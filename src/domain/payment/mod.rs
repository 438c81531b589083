//! Payment domain module.
//!
//! Covers the two pieces of logic this service owns:
//! turning an order into a hosted checkout request, and turning a verified
//! Stripe webhook into a normalized payment message.
//!
//! # Module Structure
//!
//! - `session` - Checkout request/line item types and minor-unit mapping
//! - `stripe_event` - Stripe event envelope and the typed `WebhookEvent`
//! - `webhook_verifier` - `Stripe-Signature` HMAC verification
//! - `messages` - Outbound `payment.succeeded` payload
//! - `errors` - Session and webhook error types

mod errors;
mod messages;
mod session;
mod stripe_event;
mod webhook_verifier;

pub use errors::{PaymentSessionError, WebhookError};
pub use messages::{PaymentSucceededMessage, PAYMENT_SUCCEEDED_TOPIC};
pub use session::{
    to_minor_units, CheckoutResult, CheckoutSessionParams, LineItem, PaymentSessionRequest,
    RedirectUrls, SessionItem,
};
pub use stripe_event::{ChargeSucceeded, StripeEvent, StripeEventData, WebhookEvent};
pub use webhook_verifier::{
    compute_signature_hex, SignatureHeader, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS,
};
