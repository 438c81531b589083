//! MessagePublisher port - Interface for the outbound message channel.
//!
//! Lets the application emit integration messages without knowing
//! about the underlying broker (Redis pub/sub, in-memory).

use async_trait::async_trait;
use thiserror::Error;

/// Errors from publishing a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// Payload could not be serialized.
    #[error("Message serialization failed: {0}")]
    Serialization(String),

    /// Broker rejected the message or could not be reached.
    #[error("Message channel unavailable: {0}")]
    Unavailable(String),
}

/// Port for publishing messages to other services.
///
/// One call is one delivery attempt; implementations do not retry and
/// report failures to the caller.
///
/// # Example
///
/// ```ignore
/// publisher.publish("payment.succeeded", serde_json::to_value(&message)?).await?;
/// ```
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish a JSON payload on a topic.
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError>;
}
