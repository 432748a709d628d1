//! Domain types and models

pub mod credentials;
pub mod format;
pub mod method;
pub mod params;
pub mod response;

// Re-export for convenience
pub use credentials::Credentials;
pub use format::{Format, SignatureAlgorithm};
pub use method::HttpMethod;
pub use params::{ParamValue, ParameterMap};
pub use response::ApiResponse;
