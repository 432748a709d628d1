//! # Sailthru API
//!
//! Client for the Sailthru email API.
//!
//! This crate contains:
//! - `SailthruClient`, the entry point for every command
//! - Typed commands for sends, blasts, lists, templates and the other areas
//! - Postback validation and the horizon cookie
//!
//! ## Architecture
//! - Depends on `sailthru-domain`, `sailthru-core`, and `sailthru-infra`
//! - Wires a transport from `sailthru-infra` into the core client
//! - Logs every command with its duration and outcome
//!
//! ```no_run
//! use sailthru_api::{ClientConfig, SailthruClient, SendRequest};
//!
//! let client = SailthruClient::new(ClientConfig::new("api-key", "secret"))?;
//! let response = client.send(SendRequest::new("welcome", "a@b.com"))?;
//! println!("{:?}", response.get_str("send_id"));
//! # Ok::<(), sailthru_api::SailthruError>(())
//! ```

pub mod client;
pub mod commands;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export for convenience
pub use client::SailthruClient;
pub use commands::*;
pub use sailthru_core::{ApiClient, PostbackKind, PreparedRequest, Transport};
pub use sailthru_domain::{
    ApiResponse, ClientConfig, Credentials, Format, HttpMethod, ParamValue, ParameterMap, Result,
    SailthruError, SignatureAlgorithm, TransportPreference,
};
