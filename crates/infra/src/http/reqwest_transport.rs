use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use sailthru_core::{PreparedRequest, Transport};
use sailthru_domain::{HttpMethod, Result, SailthruError};
use tracing::debug;

use crate::errors::InfraError;

/// Blocking transport backed by `reqwest`.
///
/// The client is reference counted internally, so clones share one
/// connection pool. Redirects are not followed and bodies are read as UTF-8
/// (invalid bytes replaced) whatever the declared charset, matching
/// [`SocketTransport`](crate::http::SocketTransport).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the underlying client.
    ///
    /// # Errors
    /// Returns `SailthruError::Config` when the TLS backend or client cannot
    /// be initialised. Callers probing for the capability treat this as
    /// "unavailable".
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| {
                let infra: InfraError = err.into();
                SailthruError::from(infra)
            })?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    fn execute(&self, request: &PreparedRequest) -> Result<String> {
        let endpoint = request.endpoint();
        let method = match request.method() {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.client.request(method.clone(), request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        debug!(url = endpoint, %method, "sending HTTP request");
        let response = builder.send().map_err(|err| to_domain(err, endpoint))?;
        let status = response.status();
        let bytes = response.bytes().map_err(|err| to_domain(err, endpoint))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(url = endpoint, %status, bytes = body.len(), "received HTTP response");

        if body.is_empty() {
            return Err(SailthruError::transport(endpoint, "empty response body"));
        }
        Ok(body)
    }
}

/// Map a reqwest failure, pinning the URL to the endpoint that was called.
fn to_domain(err: reqwest::Error, endpoint: &str) -> SailthruError {
    let infra: InfraError = err.into();
    match SailthruError::from(infra) {
        SailthruError::Transport { message, .. } => SailthruError::transport(endpoint, message),
        other => other,
    }
}
