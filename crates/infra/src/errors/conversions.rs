//! Conversions from external infrastructure errors into domain errors.

use std::fmt;
use std::io;

use sailthru_domain::SailthruError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SailthruError);

impl From<InfraError> for SailthruError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SailthruError> for InfraError {
    fn from(value: SailthruError) -> Self {
        InfraError(value)
    }
}

/// Failures raised while talking to a remote endpoint.
///
/// These carry no URL of their own; [`EndpointResultExt::at_endpoint`] attaches
/// the endpoint being called.
pub trait TransportFailure: fmt::Display {
    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Attach the called endpoint to a transport-level failure.
pub trait EndpointResultExt<T> {
    fn at_endpoint(self, url: &str) -> Result<T, SailthruError>;
}

impl<T, E: TransportFailure> EndpointResultExt<T> for Result<T, E> {
    fn at_endpoint(self, url: &str) -> Result<T, SailthruError> {
        self.map_err(|err| SailthruError::transport(url, err.describe()))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → transport failure */
/* -------------------------------------------------------------------------- */

impl TransportFailure for io::Error {
    fn describe(&self) -> String {
        match self.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                format!("request timed out: {self}")
            }
            io::ErrorKind::ConnectionRefused => format!("connection refused: {self}"),
            io::ErrorKind::UnexpectedEof => format!("connection closed early: {self}"),
            _ => format!("I/O failure: {self}"),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* native_tls::Error → transport failure */
/* -------------------------------------------------------------------------- */

impl TransportFailure for native_tls::Error {
    fn describe(&self) -> String {
        format!("TLS failure: {self}")
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → SailthruError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(SailthruError::Config(format!("invalid URL: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SailthruError */
/* -------------------------------------------------------------------------- */

#[cfg(feature = "reqwest-transport")]
impl From<reqwest::Error> for InfraError {
    fn from(value: reqwest::Error) -> Self {
        let url = value
            .url()
            .map(|url| {
                let mut url = url.clone();
                url.set_query(None);
                url.to_string()
            })
            .unwrap_or_else(|| "<unknown>".to_string());

        if value.is_builder() {
            return InfraError(SailthruError::Config(format!(
                "HTTP client configuration rejected: {}",
                value.without_url()
            )));
        }

        let kind = if value.is_timeout() {
            "HTTP request timed out"
        } else if value.is_connect() {
            "HTTP connection failure"
        } else if value.is_body() || value.is_decode() {
            "failed to read HTTP response body"
        } else {
            "HTTP request failed"
        };

        // The error's own URL would carry the signed query string.
        InfraError(SailthruError::transport(url, format!("{kind}: {}", value.without_url())))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
