//! Integration tests for payments HTTP endpoints.
//!
//! These tests drive the full router with in-process fakes:
//! 1. Checkout requests map to one provider call with minor-unit line items
//! 2. Webhooks are verified against the raw body before anything is published
//! 3. Only `charge.succeeded` is forwarded, once per delivery

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use payments_ms::adapters::http::{payments_router, PaymentsAppState};
use payments_ms::adapters::messaging::InMemoryMessagePublisher;
use payments_ms::adapters::stripe::MockPaymentProvider;
use payments_ms::domain::payment::{
    compute_signature_hex, CheckoutResult, RedirectUrls, StripeWebhookVerifier,
    PAYMENT_SUCCEEDED_TOPIC,
};
use payments_ms::ports::{PaymentError, PublishError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ENDPOINT_SECRET: &str = "whsec_integration_secret";
const SUCCESS_URL: &str = "https://shop.test/payments/success";
const CANCEL_URL: &str = "https://shop.test/payments/cancel";

struct TestApp {
    router: Router,
    provider: MockPaymentProvider,
    publisher: Arc<InMemoryMessagePublisher>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_publisher(InMemoryMessagePublisher::new())
    }

    fn with_publisher(publisher: InMemoryMessagePublisher) -> Self {
        let provider = MockPaymentProvider::new();
        let publisher = Arc::new(publisher);

        let state = PaymentsAppState {
            payment_provider: Arc::new(provider.clone()),
            message_publisher: publisher.clone(),
            webhook_verifier: StripeWebhookVerifier::new(ENDPOINT_SECRET),
            redirect_urls: RedirectUrls {
                success_url: SUCCESS_URL.to_string(),
                cancel_url: CANCEL_URL.to_string(),
            },
        };

        Self {
            router: payments_router().with_state(state),
            provider,
            publisher,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn create_session(&self, body: Value) -> (StatusCode, Vec<u8>) {
        self.send(
            Request::post("/payments/create-payment-session")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn webhook(&self, payload: &[u8], signature: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request =
            Request::post("/payments/webhook").header("content-type", "application/json");
        if let Some(signature) = signature {
            request = request.header("stripe-signature", signature);
        }
        self.send(request.body(Body::from(payload.to_vec())).unwrap())
            .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

fn order_request(items: Value) -> Value {
    json!({
        "currency": "usd",
        "orderId": "order-123",
        "items": items,
    })
}

fn event(event_type: &str) -> Vec<u8> {
    // Deliberately irregular spacing: the signature must cover these exact bytes.
    format!(
        r#"{{"id": "evt_1",  "object":"event","type":"{event_type}","created":1700000000,
        "data":{{"object":{{"id":"ch_1","object":"charge","amount":3998,
        "metadata":{{"orderId":"order-123"}},"receipt_url":"https://r"}}}}}}"#
    )
    .into_bytes()
}

fn sign(payload: &[u8]) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature_hex(ENDPOINT_SECRET, timestamp, payload)
    )
}

// =============================================================================
// Checkout Session Tests
// =============================================================================

#[tokio::test]
async fn create_session_maps_items_to_line_items() {
    let app = TestApp::new();

    let (status, _) = app
        .create_session(order_request(json!([
            {"name": "A", "price": 19.99, "quantity": 2},
            {"name": "B", "price": 0.5, "quantity": 1},
            {"name": "C", "price": 100, "quantity": 3},
        ])))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let calls = app.provider.calls();
    assert_eq!(calls.len(), 1);

    let line_items = &calls[0].line_items;
    assert_eq!(line_items.len(), 3);
    assert_eq!(line_items[0].name, "A");
    assert_eq!((line_items[0].unit_amount, line_items[0].quantity), (1999, 2));
    assert_eq!((line_items[1].unit_amount, line_items[1].quantity), (50, 1));
    assert_eq!((line_items[2].unit_amount, line_items[2].quantity), (10000, 3));
    assert!(line_items.iter().all(|li| li.currency == "usd"));
    assert_eq!(calls[0].order_id, "order-123");
}

#[tokio::test]
async fn create_session_returns_processor_urls() {
    let app = TestApp::new();
    app.provider.set_result(CheckoutResult {
        url: Some("https://checkout.stripe.com/c/pay/cs_test_1".to_string()),
        success_url: Some(SUCCESS_URL.to_string()),
        cancel_url: Some(CANCEL_URL.to_string()),
    });

    let (status, body) = app
        .create_session(order_request(json!([{"name": "A", "price": 19.99, "quantity": 2}])))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "url": "https://checkout.stripe.com/c/pay/cs_test_1",
            "successUrl": SUCCESS_URL,
            "cancelUrl": CANCEL_URL,
        })
    );
}

#[tokio::test]
async fn create_session_rejects_empty_cart() {
    let app = TestApp::new();

    let (status, body) = app.create_session(order_request(json!([]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn create_session_rejects_malformed_json() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Request::post("/payments/create-payment-session")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"currency": "usd""#))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn create_session_surfaces_processor_rejection() {
    let app = TestApp::new();
    app.provider
        .set_error(PaymentError::invalid_request("Invalid currency: zzz"));

    let (status, body) = app
        .create_session(order_request(json!([{"name": "A", "price": 1.0, "quantity": 1}])))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error_code"], "PAYMENT_PROVIDER_REJECTED");
}

// =============================================================================
// Webhook Tests
// =============================================================================

#[tokio::test]
async fn charge_succeeded_is_forwarded_and_signature_echoed() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");
    let signature = sign(&payload);

    let (status, body) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "sig": signature }));
    assert_eq!(
        app.publisher.messages_on(PAYMENT_SUCCEEDED_TOPIC),
        vec![json!({
            "stripePaymentId": "ch_1",
            "orderId": "order-123",
            "receiptUrl": "https://r",
        })]
    );
}

#[tokio::test]
async fn other_event_types_are_acknowledged_without_publishing() {
    let app = TestApp::new();
    let payload = event("charge.failed");
    let signature = sign(&payload);

    let (status, body) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["sig"], signature);
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn bad_signature_is_rejected_with_empty_body() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");
    let signature = format!("t={},v1={}", chrono::Utc::now().timestamp(), "ab".repeat(32));

    let (status, body) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.webhook(&event("charge.succeeded"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn signature_over_different_bytes_is_rejected() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");
    let reserialized =
        serde_json::to_vec(&serde_json::from_slice::<Value>(&payload).unwrap()).unwrap();
    let signature = sign(&reserialized);

    let (status, _) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn signed_charge_without_order_id_is_acknowledged() {
    let app = TestApp::new();
    let payload = json!({
        "id": "evt_3",
        "type": "charge.succeeded",
        "data": { "object": { "id": "ch_1", "metadata": {} } }
    })
    .to_string()
    .into_bytes();
    let signature = sign(&payload);

    let (status, body) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "sig": signature }));
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn extreme_signature_timestamps_are_rejected() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");

    for timestamp in [i64::MIN, i64::MAX] {
        let signature = format!("t={},v1={}", timestamp, "ab".repeat(32));

        let (status, body) = app.webhook(&payload, Some(&signature)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "t={timestamp}");
        assert!(body.is_empty());
    }
    assert_eq!(app.publisher.message_count(), 0);
}

#[tokio::test]
async fn undecodable_v1_next_to_valid_signature_is_accepted() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");
    let signature = format!("{},v1=zz,garbage", sign(&payload));

    let (status, _) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.publisher.messages_on(PAYMENT_SUCCEEDED_TOPIC).len(), 1);
}

#[tokio::test]
async fn redelivered_event_is_published_twice() {
    let app = TestApp::new();
    let payload = event("charge.succeeded");
    let signature = sign(&payload);

    let (first, _) = app.webhook(&payload, Some(&signature)).await;
    let (second, _) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(app.publisher.messages_on(PAYMENT_SUCCEEDED_TOPIC).len(), 2);
}

#[tokio::test]
async fn publish_failure_returns_500() {
    let app = TestApp::with_publisher(InMemoryMessagePublisher::failing(
        PublishError::Unavailable("connection refused".to_string()),
    ));
    let payload = event("charge.succeeded");
    let signature = sign(&payload);

    let (status, _) = app.webhook(&payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Landing and Health Tests
// =============================================================================

#[tokio::test]
async fn redirect_landing_endpoints() {
    let app = TestApp::new();

    assert_eq!(
        app.get("/payments/success").await,
        (StatusCode::OK, json!({"ok": true, "message": "Payment successful"}))
    );
    assert_eq!(
        app.get("/payments/cancel").await,
        (StatusCode::OK, json!({"ok": false, "message": "Payment cancelled"}))
    );
}

#[tokio::test]
async fn health_endpoint() {
    let app = TestApp::new();

    assert_eq!(app.get("/health").await, (StatusCode::OK, json!({"status": "ok"})));
}
