//! Configuration loading
//!
//! Builds a [`sailthru_domain::ClientConfig`] from environment variables or
//! configuration files on request. Nothing outside this module reads ambient
//! state.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
