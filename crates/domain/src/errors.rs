//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Sailthru client
///
/// Response decoding failures and signature mismatches are not represented
/// here: the former degrade to [`crate::ApiResponse::Raw`], the
/// latter make verification return `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SailthruError {
    /// No usable response: connection refused, timeout, unreadable or empty
    /// body.
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SailthruError {
    /// Build a transport error for the given URL.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport { url: url.into(), message: message.into() }
    }

    /// Returns `true` for network-layer failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result type alias for Sailthru client operations
pub type Result<T> = std::result::Result<T, SailthruError>;
