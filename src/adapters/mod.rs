//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes and handlers
//! - `messaging` - Message channel publishers (NATS, Redis, in-memory)
//! - `stripe` - Stripe checkout API client

pub mod http;
pub mod messaging;
pub mod stripe;

pub use messaging::{InMemoryMessagePublisher, NatsMessagePublisher, RedisMessagePublisher};
pub use stripe::{MockPaymentProvider, StripePaymentAdapter};
