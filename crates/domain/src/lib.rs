//! # Sailthru Domain
//!
//! Domain types for the Sailthru signed-request client.
//!
//! This crate contains:
//! - Request parameter maps (`ParameterMap`, `ParamValue`)
//! - Response formats and decoded responses
//! - Credentials and client configuration
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Sailthru crates
//! - No I/O: pure data structures and conversions

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
