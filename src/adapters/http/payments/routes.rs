//! Axum router configuration for payments endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment_session, health, payment_cancel, payment_success, stripe_webhook,
    PaymentsAppState,
};

/// Create the payments API router.
///
/// # Routes
/// - `POST /create-payment-session` - Open a hosted checkout
/// - `POST /webhook` - Handle Stripe webhooks (signature verified)
/// - `GET /success` - Checkout success redirect target
/// - `GET /cancel` - Checkout cancel redirect target
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/create-payment-session", post(create_payment_session))
        .route("/webhook", post(stripe_webhook))
        .route("/success", get(payment_success))
        .route("/cancel", get(payment_cancel))
}

/// Create the complete service router.
///
/// # Example
///
/// ```ignore
/// let app = payments_router().with_state(app_state);
/// axum::serve(listener, app).await?;
/// ```
pub fn payments_router() -> Router<PaymentsAppState> {
    Router::new()
        .nest("/payments", payments_routes())
        .route("/health", get(health))
}
