//! Client configuration
//!
//! Everything a client needs is fixed at construction time and passed in
//! explicitly. Loading from the environment or from files lives in the infra
//! crate; nothing here reads ambient state.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_URI;
use crate::types::{Credentials, Format, SignatureAlgorithm};
use crate::impl_wire_name_conversions;

/// Which transport implementation a client should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportPreference {
    /// Probe for the reqwest capability and fall back to sockets.
    #[default]
    Auto,
    Reqwest,
    Socket,
}

impl_wire_name_conversions!(TransportPreference {
    Auto => "auto",
    Reqwest => "reqwest",
    Socket => "socket",
});

/// Configuration for a Sailthru client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    pub secret: String,
    #[serde(default = "default_api_uri")]
    pub api_uri: String,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub transport: TransportPreference,
    #[serde(default = "default_show_version")]
    pub show_version: bool,
}

fn default_api_uri() -> String {
    DEFAULT_API_URI.to_string()
}

const fn default_show_version() -> bool {
    true
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            api_uri: default_api_uri(),
            format: Format::default(),
            signature_algorithm: SignatureAlgorithm::default(),
            timeout_secs: None,
            transport: TransportPreference::default(),
            show_version: default_show_version(),
        }
    }

    #[must_use]
    pub fn with_api_uri(mut self, api_uri: impl Into<String>) -> Self {
        self.api_uri = api_uri.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: TransportPreference) -> Self {
        self.transport = transport;
        self
    }

    #[must_use]
    pub fn with_show_version(mut self, show_version: bool) -> Self {
        self.show_version = show_version;
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.api_key, &self.secret)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check the fields a client cannot work without.
    ///
    /// # Errors
    /// Returns `SailthruError::Config` if the API key, secret or base URI is
    /// empty.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(crate::SailthruError::Config("api_key must not be empty".into()));
        }
        if self.secret.is_empty() {
            return Err(crate::SailthruError::Config("secret must not be empty".into()));
        }
        if self.api_uri.trim().is_empty() {
            return Err(crate::SailthruError::Config("api_uri must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .field("api_uri", &self.api_uri)
            .field("format", &self.format)
            .field("signature_algorithm", &self.signature_algorithm)
            .field("timeout_secs", &self.timeout_secs)
            .field("transport", &self.transport)
            .field("show_version", &self.show_version)
            .finish()
    }
}
