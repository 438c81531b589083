//! Redis pub/sub message publisher.
//!
//! Each message is a single `PUBLISH topic <json>`. Messages are fire-and-forget
//! on the broker side; a subscriber that is offline misses them.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::MessagingConfig;
use crate::ports::{MessagePublisher, PublishError};

/// Redis-backed implementation of `MessagePublisher`.
#[derive(Clone)]
pub struct RedisMessagePublisher {
    conn: MultiplexedConnection,
}

impl RedisMessagePublisher {
    /// Wrap an existing multiplexed connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a multiplexed connection to the configured broker.
    ///
    /// Fails with `PublishError::Unavailable` if the URL is invalid or the
    /// broker does not answer within `config.timeout()`.
    pub async fn connect(config: &MessagingConfig) -> Result<Self, PublishError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        let conn = tokio::time::timeout(config.timeout(), client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| {
                PublishError::Unavailable(format!(
                    "connect timed out after {}s",
                    config.timeout_secs
                ))
            })?
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn))
    }
}

#[async_trait]
impl MessagePublisher for RedisMessagePublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        let body = serde_json::to_string(&payload)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();

        let receivers: i64 = conn
            .publish(topic, body)
            .await
            .map_err(|e: redis::RedisError| PublishError::Unavailable(e.to_string()))?;

        tracing::debug!(topic, receivers, "Message published");
        Ok(())
    }
}

impl std::fmt::Debug for RedisMessagePublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMessagePublisher").finish_non_exhaustive()
    }
}
