//! Sailthru client - entry point for every API command

use std::sync::Arc;
use std::time::Instant;

use sailthru_core::{ApiClient, Transport};
use sailthru_domain::{ApiResponse, ClientConfig, HttpMethod, ParameterMap, Result};
use sailthru_infra::{config, select_transport};

use crate::utils::logging::log_command_execution;

/// High-level Sailthru API client.
///
/// Wraps an [`ApiClient`] whose transport is chosen once, at construction.
/// Every command is one blocking round trip; the client is `Send + Sync` and
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct SailthruClient {
    api: ApiClient,
}

impl SailthruClient {
    /// Create a client, selecting the transport `config` asks for.
    ///
    /// # Errors
    /// Returns `SailthruError::Config` for missing credentials or an
    /// unavailable forced transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = select_transport(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self { api: ApiClient::new(&config, transport)? })
    }

    /// Create a client from environment variables or a config file.
    pub fn from_env() -> Result<Self> {
        Self::new(config::load()?)
    }

    /// The underlying signed-request client, for endpoints without a
    /// dedicated command.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn get(&self, command: &'static str, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.run(command, || self.api.api_get(action, params))
    }

    pub(crate) fn post(&self, command: &'static str, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.run(command, || self.api.api_post(action, params))
    }

    /// POST-style call sent with the DELETE verb.
    pub(crate) fn delete(&self, command: &'static str, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.run(command, || self.api.api_post_with_method(action, params, HttpMethod::Delete))
    }

    fn run(&self, command: &'static str, call: impl FnOnce() -> Result<ApiResponse>) -> Result<ApiResponse> {
        let start = Instant::now();
        let result = call();
        log_command_execution(command, start.elapsed(), &result);
        result
    }
}
