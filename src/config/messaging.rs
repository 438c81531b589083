//! Message channel configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Broker family selected by the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingTransport {
    /// `nats://` or `tls://`
    Nats,
    /// `redis://` or `rediss://`
    Redis,
}

/// Message channel configuration (NATS or Redis pub/sub)
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Broker connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MessagingConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Broker family for the configured URL, if the scheme is supported
    pub fn transport(&self) -> Option<MessagingTransport> {
        let (scheme, _) = self.url.split_once("://")?;
        match scheme {
            "nats" | "tls" => Some(MessagingTransport::Nats),
            "redis" | "rediss" => Some(MessagingTransport::Redis),
            _ => None,
        }
    }

    /// Validate message channel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("MESSAGING_URL"));
        }
        if self.transport().is_none() {
            return Err(ValidationError::InvalidMessagingUrl);
        }
        Ok(())
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
