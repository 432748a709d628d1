//! HTTP transports
//!
//! Two implementations of the `sailthru_core::Transport` port plus the
//! factory that picks one at client construction.

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport;
mod selection;
mod socket_transport;

#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::ReqwestTransport;
pub use selection::{reqwest_available, select_transport};
pub use socket_transport::SocketTransport;
