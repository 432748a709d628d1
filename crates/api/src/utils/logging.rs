use std::time::Duration;

use sailthru_domain::{ApiResponse, Result, SailthruError};
use tracing::{debug, info, warn};

/// Log the outcome of an API command with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"send::get_send"`).
/// * `elapsed` - Duration the round trip took.
/// * `result` - Outcome of the call.
///
/// Application errors reported in the response body are logged at debug;
/// the call itself succeeded. Callers must avoid forwarding sensitive values
/// in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, result: &Result<ApiResponse>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(response) => {
            info!(command, duration_ms, raw = response.is_raw(), "command_execution_success");
            if response.is_error() {
                debug!(
                    command,
                    error_code = response.error_code(),
                    error_message = response.error_message(),
                    "remote application error"
                );
            }
        }
        Err(err) => {
            warn!(command, duration_ms, error = error_label(err), "command_execution_failure");
        }
    }
}

/// Convert a `SailthruError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &SailthruError) -> &'static str {
    match error {
        SailthruError::Transport { .. } => "transport",
        SailthruError::Config(_) => "config",
        SailthruError::InvalidInput(_) => "invalid_input",
        SailthruError::Internal(_) => "internal",
    }
}
