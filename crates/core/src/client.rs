//! Signed request orchestration
//!
//! [`ApiClient`] is the only place that knows how a request becomes a signed
//! request: it injects `api_key` and `format`, signs, dispatches through the
//! [`Transport`] it was built with, and decodes the body in the format it
//! actually asked for.

use std::fmt;
use std::sync::Arc;

use sailthru_domain::constants::{PARAM_API_KEY, PARAM_FORMAT, PARAM_SIG};
use sailthru_domain::{
    ApiResponse, ClientConfig, Credentials, Format, HttpMethod, ParamValue, ParameterMap, Result,
    SailthruError, SignatureAlgorithm,
};
use tracing::{debug, info, instrument};

use crate::codec;
use crate::postback::{self, PostbackKind};
use crate::signing::sign_with;
use crate::transport_ports::{user_agent, PreparedRequest, Transport};

/// Low-level signed-request client.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    credentials: Credentials,
    api_uri: String,
    format: Format,
    algorithm: SignatureAlgorithm,
    user_agent: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client from validated configuration and a chosen transport.
    ///
    /// # Errors
    /// Returns `SailthruError::Config` if the API key, secret or base URI is
    /// empty.
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let client = Self {
            credentials: config.credentials(),
            api_uri: config.api_uri.trim_end_matches('/').to_string(),
            format: config.format,
            algorithm: config.signature_algorithm,
            user_agent: user_agent(config.show_version),
            transport,
        };

        info!(
            api_uri = %client.api_uri,
            transport = client.transport.name(),
            format = %client.format,
            "Sailthru client initialized"
        );
        Ok(client)
    }

    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Issue a signed GET.
    pub fn api_get(&self, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Get, action, params)
    }

    /// Issue a signed POST.
    pub fn api_post(&self, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.dispatch(HttpMethod::Post, action, params)
    }

    /// Issue a signed request with an explicit method.
    pub fn api_post_with_method(
        &self,
        action: &str,
        params: ParameterMap,
        method: HttpMethod,
    ) -> Result<ApiResponse> {
        self.dispatch(method, action, params)
    }

    /// Issue a signed DELETE.
    pub fn api_delete(&self, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        self.api_post_with_method(action, params, HttpMethod::Delete)
    }

    /// Attach `api_key`, `format` (unless the caller chose one) and `sig`.
    ///
    /// `sig` is always the last entry; a caller-supplied `sig` is discarded.
    pub fn sign_params(&self, mut params: ParameterMap) -> ParameterMap {
        params.insert(PARAM_API_KEY, self.credentials.api_key());
        if !params.contains_key(PARAM_FORMAT) {
            params.insert(PARAM_FORMAT, self.format.as_str());
        }
        params.remove(PARAM_SIG);

        let sig = sign_with(&params, self.credentials.secret(), self.algorithm);
        params.insert(PARAM_SIG, sig);
        params
    }

    /// `{api_uri}/{action}`
    pub fn endpoint(&self, action: &str) -> String {
        format!("{}/{}", self.api_uri, action.trim_start_matches('/'))
    }

    /// Check an inbound field map against the shared secret.
    pub fn verify_inbound_signature(&self, fields: &ParameterMap, required_fields: &[&str]) -> bool {
        postback::verify_signature(fields, required_fields, self.credentials.secret(), self.algorithm)
    }

    /// Structural and signature check for a postback.
    pub fn verify_postback(&self, fields: &ParameterMap, kind: PostbackKind) -> bool {
        postback::verify_postback(fields, kind, self.credentials.secret(), self.algorithm)
    }

    #[instrument(skip(self, params), fields(transport = self.transport.name()))]
    fn dispatch(&self, method: HttpMethod, action: &str, params: ParameterMap) -> Result<ApiResponse> {
        let signed = self.sign_params(params);
        let format = signed
            .get(PARAM_FORMAT)
            .and_then(ParamValue::scalar_string)
            .unwrap_or_else(|| self.format.to_string());

        let request = PreparedRequest::new(method, self.endpoint(action), &signed, &self.user_agent);
        debug!(url = request.endpoint(), %method, "sending request");

        let body = self.transport.execute(&request)?;
        debug!(url = request.endpoint(), bytes = body.len(), "received response");
        if body.is_empty() {
            return Err(SailthruError::transport(request.endpoint(), "empty response body"));
        }

        Ok(codec::decode(&body, &format))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credentials", &self.credentials)
            .field("api_uri", &self.api_uri)
            .field("format", &self.format)
            .field("algorithm", &self.algorithm)
            .field("transport", &self.transport.name())
            .finish()
    }
}
