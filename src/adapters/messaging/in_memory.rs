//! In-memory message publisher for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.
//! Production code should use `RedisMessagePublisher`.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::ports::{MessagePublisher, PublishError};

/// A message captured by `InMemoryMessagePublisher`.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// In-memory publisher that records every message for assertions.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(InMemoryMessagePublisher::new());
/// publisher.publish("payment.succeeded", payload).await?;
///
/// assert_eq!(publisher.messages_on("payment.succeeded").len(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryMessagePublisher {
    published: RwLock<Vec<PublishedMessage>>,
    failure: RwLock<Option<PublishError>>,
}

impl InMemoryMessagePublisher {
    /// Creates a new empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher whose every publish fails with `error`.
    pub fn failing(error: PublishError) -> Self {
        let publisher = Self::new();
        *publisher
            .failure
            .write()
            .expect("InMemoryMessagePublisher: failure lock poisoned") = Some(error);
        publisher
    }

    // === Test Helpers ===

    /// Returns all published messages.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .expect("InMemoryMessagePublisher: published lock poisoned")
            .clone()
    }

    /// Returns payloads published on `topic`, in order.
    pub fn messages_on(&self, topic: &str) -> Vec<serde_json::Value> {
        self.published()
            .into_iter()
            .filter(|m| m.topic == topic)
            .map(|m| m.payload)
            .collect()
    }

    /// Returns count of published messages.
    pub fn message_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryMessagePublisher: published lock poisoned")
            .len()
    }

    /// Clears all published messages (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryMessagePublisher: published write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl MessagePublisher for InMemoryMessagePublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        if let Some(error) = self
            .failure
            .read()
            .expect("InMemoryMessagePublisher: failure lock poisoned")
            .clone()
        {
            return Err(error);
        }

        self.published
            .write()
            .expect("InMemoryMessagePublisher: published write lock poisoned")
            .push(PublishedMessage {
                topic: topic.to_string(),
                payload,
            });
        Ok(())
    }
}
