//! HandleStripeWebhookHandler - Command handler for inbound Stripe webhooks.

use std::sync::Arc;

use crate::domain::payment::{
    PaymentSucceededMessage, StripeWebhookVerifier, WebhookError, WebhookEvent,
    PAYMENT_SUCCEEDED_TOPIC,
};
use crate::ports::MessagePublisher;

/// Command to handle a Stripe webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `stripe-signature` header value.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStripeWebhookResult {
    /// Charge succeeded and a `payment.succeeded` message was published.
    Forwarded {
        event_id: String,
        message: PaymentSucceededMessage,
    },
    /// Verified `charge.succeeded` that could not be tied to an order.
    Skipped { event_id: String, reason: String },
    /// Verified event of a type this service does not act on.
    Ignored { event_id: String, event_type: String },
}

/// Handler for processing Stripe webhooks.
///
/// Verifies the delivery, then forwards successful charges to the message
/// channel. Deliveries are not deduplicated: a redelivered event is published
/// again.
pub struct HandleStripeWebhookHandler {
    verifier: StripeWebhookVerifier,
    message_publisher: Arc<dyn MessagePublisher>,
}

impl HandleStripeWebhookHandler {
    pub fn new(
        verifier: StripeWebhookVerifier,
        message_publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            verifier,
            message_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        // 1. Verify signature and decode the event
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected webhook delivery");
                e
            })?;

        // 2. Dispatch on event kind
        match event {
            WebhookEvent::ChargeSucceeded(charge) => {
                let message = PaymentSucceededMessage::from(&charge);
                let payload = serde_json::to_value(&message).map_err(|e| {
                    WebhookError::PublishFailed {
                        topic: PAYMENT_SUCCEEDED_TOPIC,
                        reason: e.to_string(),
                    }
                })?;

                self.message_publisher
                    .publish(PAYMENT_SUCCEEDED_TOPIC, payload)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            event_id = %charge.event_id,
                            order_id = %charge.order_id,
                            error = %e,
                            "Failed to publish payment.succeeded"
                        );
                        WebhookError::PublishFailed {
                            topic: PAYMENT_SUCCEEDED_TOPIC,
                            reason: e.to_string(),
                        }
                    })?;

                tracing::info!(
                    event_id = %charge.event_id,
                    order_id = %charge.order_id,
                    stripe_payment_id = %charge.charge_id,
                    "Published payment.succeeded"
                );

                Ok(HandleStripeWebhookResult::Forwarded {
                    event_id: charge.event_id,
                    message,
                })
            }
            WebhookEvent::UnattributedCharge { event_id, reason } => {
                tracing::warn!(%event_id, %reason, "Verified charge not forwarded");
                Ok(HandleStripeWebhookResult::Skipped { event_id, reason })
            }
            WebhookEvent::Unrecognized {
                event_id,
                event_type,
            } => {
                tracing::info!(%event_id, "event {} not handled", event_type);
                Ok(HandleStripeWebhookResult::Ignored {
                    event_id,
                    event_type,
                })
            }
        }
    }
}
