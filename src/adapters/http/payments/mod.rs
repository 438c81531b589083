//! HTTP adapter for payments endpoints.
//!
//! - `POST /payments/create-payment-session` - Open a Stripe hosted checkout
//! - `POST /payments/webhook` - Handle Stripe webhooks
//! - `GET /payments/success` - Checkout success landing
//! - `GET /payments/cancel` - Checkout cancel landing
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{
    PaymentSessionApiError, PaymentsAppState, WebhookApiError, STRIPE_SIGNATURE_HEADER,
};
pub use routes::{payments_router, payments_routes};
