//! HTTP handlers for payments endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payments::{
    CreatePaymentSessionCommand, CreatePaymentSessionHandler, HandleStripeWebhookCommand,
    HandleStripeWebhookHandler,
};
use crate::domain::payment::{
    PaymentSessionError, PaymentSessionRequest, RedirectUrls, StripeWebhookVerifier,
    WebhookError,
};
use crate::ports::{MessagePublisher, PaymentProvider};

use super::dto::{ErrorResponse, HealthResponse, RedirectLandingResponse, WebhookAck};

/// Header carrying Stripe's webhook signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Built once at startup and cloned for each request.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub message_publisher: Arc<dyn MessagePublisher>,
    pub webhook_verifier: StripeWebhookVerifier,
    pub redirect_urls: RedirectUrls,
}

impl PaymentsAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_payment_session_handler(&self) -> CreatePaymentSessionHandler {
        CreatePaymentSessionHandler::new(
            self.payment_provider.clone(),
            self.redirect_urls.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.message_publisher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payments/create-payment-session - Open a hosted checkout for an order
pub async fn create_payment_session(
    State(state): State<PaymentsAppState>,
    payload: Result<Json<PaymentSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentSessionApiError> {
    let Json(request) =
        payload.map_err(|rejection| PaymentSessionError::invalid_request(rejection.body_text()))?;

    let handler = state.create_payment_session_handler();
    let cmd = CreatePaymentSessionCommand { request };

    let result = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /payments/webhook - Handle Stripe webhook events
///
/// The body is taken as raw bytes; the signature covers them exactly.
pub async fn stripe_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| WebhookError::verification("missing stripe-signature header"))
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected webhook delivery");
            e
        })?
        .to_string();

    let handler = state.webhook_handler();
    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature: signature.clone(),
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookAck { sig: signature }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /payments/success - Checkout success redirect target
pub async fn payment_success() -> Json<RedirectLandingResponse> {
    Json(RedirectLandingResponse::success())
}

/// GET /payments/cancel - Checkout cancel redirect target
pub async fn payment_cancel() -> Json<RedirectLandingResponse> {
    Json(RedirectLandingResponse::cancelled())
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for checkout session creation.
#[derive(Debug)]
pub struct PaymentSessionApiError(PaymentSessionError);

impl From<PaymentSessionError> for PaymentSessionApiError {
    fn from(err: PaymentSessionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentSessionApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = ErrorResponse::new(self.0.error_code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}

/// API error type for webhook deliveries.
///
/// Verification failures answer 400 with an empty body so nothing about the
/// failure leaks to the caller.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        if !self.0.is_retryable() {
            return self.0.status_code().into_response();
        }
        let body = ErrorResponse::new("PUBLISH_FAILED", self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_api_error_maps_invalid_request_to_400() {
        let err = PaymentSessionApiError(PaymentSessionError::invalid_request("no items"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_api_error_maps_rejection_to_502() {
        let err = PaymentSessionApiError(PaymentSessionError::Rejected("bad currency".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn session_api_error_maps_auth_failure_to_500() {
        let err = PaymentSessionApiError(PaymentSessionError::Authentication("bad key".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn webhook_api_error_maps_verification_to_400() {
        let err = WebhookApiError(WebhookError::verification("bad signature"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_api_error_verification_body_is_empty() {
        let err = WebhookApiError(WebhookError::verification("bad signature"));
        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn webhook_api_error_maps_publish_failure_to_500() {
        let err = WebhookApiError(WebhookError::PublishFailed {
            topic: "payment.succeeded",
            reason: "down".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
