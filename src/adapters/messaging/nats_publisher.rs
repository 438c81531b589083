//! NATS message publisher, the channel the order services subscribe to.
//!
//! Each message is published on the subject named by the topic. The body is
//! the `{"pattern": topic, "data": payload}` envelope used by NestJS event
//! consumers, so `payment.succeeded` handlers receive `data` unchanged.

use async_nats::Client;
use async_trait::async_trait;
use serde_json::json;

use crate::config::MessagingConfig;
use crate::ports::{MessagePublisher, PublishError};

/// NATS-backed implementation of `MessagePublisher`.
#[derive(Clone)]
pub struct NatsMessagePublisher {
    client: Client,
}

impl NatsMessagePublisher {
    /// Wrap an already-connected client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect to the configured server.
    ///
    /// Fails with `PublishError::Unavailable` if the URL is invalid or the
    /// server does not answer within `config.timeout()`.
    pub async fn connect(config: &MessagingConfig) -> Result<Self, PublishError> {
        let connect = async_nats::ConnectOptions::new()
            .connection_timeout(config.timeout())
            .connect(config.url.as_str());

        let client = tokio::time::timeout(config.timeout(), connect)
            .await
            .map_err(|_| {
                PublishError::Unavailable(format!(
                    "connect timed out after {}s",
                    config.timeout_secs
                ))
            })?
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        Ok(Self::new(client))
    }
}

/// Serialize `payload` inside the event envelope for `topic`.
fn envelope(topic: &str, payload: serde_json::Value) -> Result<Vec<u8>, PublishError> {
    serde_json::to_vec(&json!({ "pattern": topic, "data": payload }))
        .map_err(|e| PublishError::Serialization(e.to_string()))
}

#[async_trait]
impl MessagePublisher for NatsMessagePublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        let body = envelope(topic, payload)?;

        self.client
            .publish(topic.to_string(), body.into())
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        // Publish only buffers; flush so a dead connection surfaces here
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        tracing::debug!(topic, "Message published");
        Ok(())
    }
}

impl std::fmt::Debug for NatsMessagePublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsMessagePublisher").finish_non_exhaustive()
    }
}
