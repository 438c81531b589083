//! Payments microservice.
//!
//! Opens Stripe hosted checkout sessions for orders and forwards verified
//! `charge.succeeded` webhooks onto the `payment.succeeded` message channel.
//!
//! Hexagonal layout:
//! - `domain` - checkout mapping, webhook verification, message types
//! - `ports` - `PaymentProvider` and `MessagePublisher` contracts
//! - `adapters` - Stripe, Redis and HTTP implementations
//! - `application` - command handlers wiring ports to domain logic
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
