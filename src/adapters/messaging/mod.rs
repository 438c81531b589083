//! Message channel adapters.
//!
//! - `NatsMessagePublisher` - NATS, the default production channel
//! - `RedisMessagePublisher` - Redis pub/sub, selected by a `redis://` URL
//! - `InMemoryMessagePublisher` - captures messages for tests

mod in_memory;
mod nats_publisher;
mod redis_publisher;

pub use in_memory::{InMemoryMessagePublisher, PublishedMessage};
pub use nats_publisher::NatsMessagePublisher;
pub use redis_publisher::RedisMessagePublisher;
