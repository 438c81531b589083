//! Stripe webhook event types.
//!
//! `StripeEvent` mirrors the JSON envelope; only fields relevant to our
//! processing are captured. `WebhookEvent` is the typed view the
//! dispatcher matches on.

use std::collections::HashMap;

use serde::Deserialize;

const CHARGE_SUCCEEDED: &str = "charge.succeeded";

/// Metadata key set on the payment intent when the session is created.
const ORDER_ID_METADATA_KEY: &str = "orderId";

/// Stripe webhook event envelope (simplified).
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "charge.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Object containing event-specific data.
    pub data: StripeEventData,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

/// The fields of a Stripe charge object we forward.
#[derive(Debug, Deserialize)]
struct StripeCharge {
    id: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    receipt_url: Option<String>,
}

/// A successful charge for one of our checkout sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeSucceeded {
    pub event_id: String,
    pub charge_id: String,
    pub order_id: String,
    pub receipt_url: Option<String>,
}

/// Verified webhook event, one variant per kind we act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    ChargeSucceeded(ChargeSucceeded),
    /// `charge.succeeded` that cannot be tied to an order (no `orderId`
    /// metadata, or an undecodable charge object).
    UnattributedCharge { event_id: String, reason: String },
    /// Any other event type; acknowledged and dropped.
    Unrecognized { event_id: String, event_type: String },
}

impl WebhookEvent {
    pub fn event_id(&self) -> &str {
        match self {
            WebhookEvent::ChargeSucceeded(charge) => &charge.event_id,
            WebhookEvent::UnattributedCharge { event_id, .. }
            | WebhookEvent::Unrecognized { event_id, .. } => event_id,
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            WebhookEvent::ChargeSucceeded(_) | WebhookEvent::UnattributedCharge { .. } => {
                CHARGE_SUCCEEDED
            }
            WebhookEvent::Unrecognized { event_type, .. } => event_type,
        }
    }
}

impl From<StripeEvent> for WebhookEvent {
    fn from(event: StripeEvent) -> Self {
        if event.event_type != CHARGE_SUCCEEDED {
            return WebhookEvent::Unrecognized {
                event_id: event.id,
                event_type: event.event_type,
            };
        }

        let charge = match serde_json::from_value::<StripeCharge>(event.data.object) {
            Ok(charge) => charge,
            Err(e) => {
                return WebhookEvent::UnattributedCharge {
                    event_id: event.id,
                    reason: format!("invalid charge: {e}"),
                }
            }
        };

        match charge.metadata.get(ORDER_ID_METADATA_KEY) {
            Some(order_id) => WebhookEvent::ChargeSucceeded(ChargeSucceeded {
                event_id: event.id,
                charge_id: charge.id,
                order_id: order_id.clone(),
                receipt_url: charge.receipt_url,
            }),
            None => WebhookEvent::UnattributedCharge {
                event_id: event.id,
                reason: format!("charge {} has no orderId metadata", charge.id),
            },
        }
    }
}
