//! Request signing
//!
//! Every request carries a `sig` parameter proving the caller knows the
//! shared secret. The same computation verifies inbound postbacks.

mod signer;

pub use signer::{sign, sign_with, signature_string, signature_values};
