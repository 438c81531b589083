//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - Hosted checkout session creation (Stripe)
//! - `MessagePublisher` - Outbound message channel (Redis pub/sub)

mod message_publisher;
mod payment_provider;

pub use message_publisher::{MessagePublisher, PublishError};
pub use payment_provider::{PaymentError, PaymentErrorCode, PaymentProvider};
