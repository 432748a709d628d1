use std::sync::Arc;

use sailthru_core::codec::parse_form;
use sailthru_core::testing::RecordingTransport;
use sailthru_core::PreparedRequest;
use sailthru_domain::{ClientConfig, ParameterMap};

use crate::SailthruClient;

pub const API_URI: &str = "https://api.example.test";

/// Client over a recording transport that answers with `body`.
pub fn client_with(body: &str) -> (SailthruClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::with_body(body));
    let config = ClientConfig::new("key-123", "s3cr3t").with_api_uri(API_URI);
    let client = SailthruClient::with_transport(config, transport.clone()).unwrap();
    (client, transport)
}

/// Parameters of a recorded request, from its query or body.
pub fn sent_params(request: &PreparedRequest) -> ParameterMap {
    match request.body() {
        Some(body) => parse_form(body),
        None => parse_form(request.url().split_once('?').map_or("", |(_, query)| query)),
    }
}

/// Names of the recorded parameters, without the injected `api_key`,
/// `format` and `sig`.
pub fn sent_names(request: &PreparedRequest) -> Vec<String> {
    sent_params(request)
        .keys()
        .filter(|key| !matches!(*key, "api_key" | "format" | "sig"))
        .map(str::to_string)
        .collect()
}
