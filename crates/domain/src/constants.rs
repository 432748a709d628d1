//! Client constants
//!
//! Centralized location for wire-level names and defaults.

// Endpoint configuration
pub const DEFAULT_API_URI: &str = "https://api.sailthru.com";

// Reserved request parameters injected by the client
pub const PARAM_API_KEY: &str = "api_key";
pub const PARAM_FORMAT: &str = "format";
pub const PARAM_SIG: &str = "sig";

// Postback fields
pub const PARAM_ACTION: &str = "action";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_SEND_ID: &str = "send_id";

// User agent sent on every request
pub const USER_AGENT_BASE: &str = "Sailthru API Rust Client";
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Content type for POST bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Horizon cookie
pub const HORIZON_COOKIE_NAME: &str = "sailthru_hid";
pub const HORIZON_COOKIE_DEFAULT_TTL_SECS: u64 = 31_556_926;
