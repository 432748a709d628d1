//! Shared helpers for `sailthru-infra` integration tests.

use std::sync::{Arc, Once};

use sailthru_core::Transport;
use sailthru_infra::SocketTransport;

pub const USER_AGENT: &str = "Sailthru API Rust Client";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Transport implementations under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Reqwest,
    Socket,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::Reqwest, TransportKind::Socket];

    /// Build the transport. Must run on a blocking thread: the reqwest
    /// blocking client cannot be created or dropped inside the async runtime.
    pub fn build(self) -> Arc<dyn Transport> {
        match self {
            TransportKind::Reqwest => {
                Arc::new(sailthru_infra::ReqwestTransport::new(None).expect("reqwest transport"))
            }
            TransportKind::Socket => Arc::new(SocketTransport::new(None)),
        }
    }
}

/// Run blocking client code off the async runtime.
pub async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

/// Address on localhost that refuses connections.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
