//! Outbound messages published to the message channel.

use serde::{Deserialize, Serialize};

use super::stripe_event::ChargeSucceeded;

/// Channel that receives one message per successful charge.
pub const PAYMENT_SUCCEEDED_TOPIC: &str = "payment.succeeded";

/// Normalized notification that an order has been paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSucceededMessage {
    /// Stripe charge id (ch_...).
    pub stripe_payment_id: String,
    pub order_id: String,
    pub receipt_url: Option<String>,
}

impl From<&ChargeSucceeded> for PaymentSucceededMessage {
    fn from(charge: &ChargeSucceeded) -> Self {
        Self {
            stripe_payment_id: charge.charge_id.clone(),
            order_id: charge.order_id.clone(),
            receipt_url: charge.receipt_url.clone(),
        }
    }
}
