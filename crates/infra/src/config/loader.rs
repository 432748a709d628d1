//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SAILTHRU_API_KEY`: API key (required)
//! - `SAILTHRU_SECRET`: Shared secret (required)
//! - `SAILTHRU_API_URI`: Base URI override
//! - `SAILTHRU_FORMAT`: Response format (`json`, `php`, `xml`)
//! - `SAILTHRU_SIGNATURE_ALGORITHM`: `md5` or `sha256`
//! - `SAILTHRU_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `SAILTHRU_TRANSPORT`: `auto`, `reqwest` or `socket`
//! - `SAILTHRU_SHOW_VERSION`: Whether the user agent carries the client
//!   version (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./sailthru.json` or `./sailthru.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../sailthru.{json,toml}` and `../../sailthru.{json,toml}`
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sailthru_domain::{ClientConfig, Result, SailthruError};

pub const ENV_API_KEY: &str = "SAILTHRU_API_KEY";
pub const ENV_SECRET: &str = "SAILTHRU_SECRET";
pub const ENV_API_URI: &str = "SAILTHRU_API_URI";
pub const ENV_FORMAT: &str = "SAILTHRU_FORMAT";
pub const ENV_SIGNATURE_ALGORITHM: &str = "SAILTHRU_SIGNATURE_ALGORITHM";
pub const ENV_TIMEOUT_SECS: &str = "SAILTHRU_TIMEOUT_SECS";
pub const ENV_TRANSPORT: &str = "SAILTHRU_TRANSPORT";
pub const ENV_SHOW_VERSION: &str = "SAILTHRU_SHOW_VERSION";

const CONFIG_FILE_NAMES: [&str; 4] = ["sailthru.json", "sailthru.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SailthruError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or empty
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SAILTHRU_API_KEY` and `SAILTHRU_SECRET` must be present; everything else
/// falls back to the defaults of [`ClientConfig::new`].
///
/// # Errors
/// Returns `SailthruError::Config` if required variables are missing or an
/// optional variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var(ENV_API_KEY)?, env_var(ENV_SECRET)?);

    if let Some(api_uri) = optional_env_var(ENV_API_URI) {
        config.api_uri = api_uri;
    }
    if let Some(format) = env_parse(ENV_FORMAT)? {
        config.format = format;
    }
    if let Some(algorithm) = env_parse(ENV_SIGNATURE_ALGORITHM)? {
        config.signature_algorithm = algorithm;
    }
    if let Some(timeout) = env_parse::<u64>(ENV_TIMEOUT_SECS)? {
        config.timeout_secs = Some(timeout);
    }
    if let Some(transport) = env_parse(ENV_TRANSPORT)? {
        config.transport = transport;
    }
    config.show_version = env_bool(ENV_SHOW_VERSION, config.show_version);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SailthruError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or empty
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SailthruError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SailthruError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SailthruError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, detecting the format from the
/// file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SailthruError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SailthruError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SailthruError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// executable's directory, in that order.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../sailthru.json"));
        candidates.push(cwd.join("../sailthru.toml"));
        candidates.push(cwd.join("../../sailthru.json"));
        candidates.push(cwd.join("../../sailthru.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name))
}

/// Get required environment variable
///
/// # Errors
/// Returns `SailthruError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key)
        .ok_or_else(|| SailthruError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable with `FromStr`.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| SailthruError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
