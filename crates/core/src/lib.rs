//! # Sailthru Core
//!
//! Pure request logic - no network or filesystem access.
//!
//! This crate contains:
//! - Request signing
//! - Form encoding and response decoding
//! - The transport port (trait) and prepared requests
//! - The signed-request client and postback verification
//!
//! ## Architecture Principles
//! - Only depends on `sailthru-domain`
//! - All HTTP goes through the [`Transport`] trait
//! - Pure, testable logic

pub mod client;
pub mod codec;
pub mod postback;
pub mod signing;
pub mod transport_ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::ApiClient;
pub use postback::PostbackKind;
pub use transport_ports::{user_agent, PreparedRequest, Transport};
