//! Transport port for issuing HTTP requests.
//!
//! The core never touches the network. It builds a [`PreparedRequest`] and
//! hands it to whichever [`Transport`] the client was constructed with.
//! Because every implementation executes the same prepared request, request
//! semantics (encoding, headers, parameter placement) are defined once, here.
//!
//! # Example
//!
//! ```no_run
//! use sailthru_core::{PreparedRequest, Transport};
//! use sailthru_domain::{HttpMethod, ParameterMap};
//!
//! fn fetch(transport: &dyn Transport) -> sailthru_domain::Result<String> {
//!     let params = ParameterMap::new().with("send_id", "abc");
//!     let request = PreparedRequest::new(
//!         HttpMethod::Get,
//!         "https://api.sailthru.com/send",
//!         &params,
//!         "Sailthru API Rust Client",
//!     );
//!     transport.execute(&request)
//! }
//! ```

use sailthru_domain::constants::{CLIENT_VERSION, FORM_CONTENT_TYPE, USER_AGENT_BASE};
use sailthru_domain::{HttpMethod, ParameterMap, Result};

use crate::codec::encode_form;

/// A fully encoded request, ready to put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    method: HttpMethod,
    endpoint: String,
    url: String,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Encode `params` for `method`.
    ///
    /// GET and DELETE append the form-encoded parameters to the URL query
    /// string and carry no body. POST sends them as a form-encoded body.
    pub fn new(
        method: HttpMethod,
        endpoint: impl Into<String>,
        params: &ParameterMap,
        user_agent: &str,
    ) -> Self {
        let endpoint = endpoint.into();
        let encoded = encode_form(params);
        let mut headers = vec![("User-Agent".to_string(), user_agent.to_string())];

        let (url, body) = if method.has_body() {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
            (endpoint.clone(), Some(encoded))
        } else if encoded.is_empty() {
            (endpoint.clone(), None)
        } else {
            let separator = if endpoint.contains('?') { '&' } else { '?' };
            (format!("{endpoint}{separator}{encoded}"), None)
        };

        Self { method, endpoint, url, body, headers }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Target URL without the query string.
    ///
    /// Errors and logs use this form so credentials in the query never leak.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL, including the query string for GET and DELETE.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Port for the HTTP layer.
///
/// Implementations perform exactly one blocking round trip per call, must be
/// reentrant, and return the response body whatever the status code.
/// Application errors arrive in the body and are decoded like any other
/// payload.
pub trait Transport: Send + Sync {
    /// Short identifier used in logs (e.g. `reqwest`, `socket`).
    fn name(&self) -> &'static str;

    /// Execute the request and return the raw response body.
    ///
    /// # Errors
    /// Returns `SailthruError::Transport` carrying the request endpoint when
    /// no connection could be made, the request timed out, the response could
    /// not be read, or the body was empty.
    fn execute(&self, request: &PreparedRequest) -> Result<String>;
}

/// User agent sent with every request.
pub fn user_agent(show_version: bool) -> String {
    if show_version {
        format!("{USER_AGENT_BASE} Version: {CLIENT_VERSION}")
    } else {
        USER_AGENT_BASE.to_string()
    }
}
