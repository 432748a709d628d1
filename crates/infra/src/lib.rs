//! # Sailthru Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transports (reqwest blocking client, raw socket fallback)
//! - Capability-checked transport selection
//! - Configuration loading from environment and files
//! - Conversions from foreign errors into domain errors
//!
//! ## Architecture
//! - Implements the `Transport` trait defined in `sailthru-core`
//! - Depends on `sailthru-domain` and `sailthru-core`
//! - Contains all "impure" code (sockets, TLS, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
