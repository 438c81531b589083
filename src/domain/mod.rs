//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Checkout session mapping, webhook verification and typed events

pub mod payment;
