//! Infrastructure error handling

pub mod conversions;

pub use conversions::{EndpointResultExt, InfraError, TransportFailure};
