//! Transport selection
//!
//! Chooses the transport once, when a client is built. With
//! [`TransportPreference::Auto`] the reqwest capability is probed and the
//! socket transport is used when it is missing or fails to initialise.

use std::sync::Arc;
use std::time::Duration;

use sailthru_core::Transport;
use sailthru_domain::{ClientConfig, Result, TransportPreference};
use tracing::{debug, warn};

use super::SocketTransport;

/// Whether the reqwest-backed transport was compiled in.
pub const fn reqwest_available() -> bool {
    cfg!(feature = "reqwest-transport")
}

/// Build the transport `config` asks for.
///
/// # Errors
/// Returns `SailthruError::Config` when `TransportPreference::Reqwest` is
/// forced but the capability is not compiled in or cannot initialise.
pub fn select_transport(config: &ClientConfig) -> Result<Arc<dyn Transport>> {
    let timeout = config.timeout();
    match config.transport {
        TransportPreference::Socket => Ok(socket(timeout)),
        TransportPreference::Reqwest => reqwest_transport(timeout),
        TransportPreference::Auto => match reqwest_transport(timeout) {
            Ok(transport) => {
                debug!(transport = transport.name(), "reqwest capability available");
                Ok(transport)
            }
            Err(err) => {
                warn!(error = %err, "reqwest transport unavailable, falling back to sockets");
                Ok(socket(timeout))
            }
        },
    }
}

fn socket(timeout: Option<Duration>) -> Arc<dyn Transport> {
    Arc::new(SocketTransport::new(timeout))
}

#[cfg(feature = "reqwest-transport")]
fn reqwest_transport(timeout: Option<Duration>) -> Result<Arc<dyn Transport>> {
    let transport = super::ReqwestTransport::new(timeout)?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "reqwest-transport"))]
fn reqwest_transport(_timeout: Option<Duration>) -> Result<Arc<dyn Transport>> {
    Err(sailthru_domain::SailthruError::Config(
        "reqwest transport is not compiled in; enable the `reqwest-transport` feature".to_string(),
    ))
}
