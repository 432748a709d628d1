//! End-to-end signing scenarios through the public `sailthru-core` API.

mod support;

use std::sync::Arc;

use sailthru_core::codec::parse_form;
use sailthru_core::signing::sign;
use sailthru_core::testing::RecordingTransport;
use sailthru_core::{ApiClient, PostbackKind};
use sailthru_domain::{ApiResponse, ClientConfig, ParameterMap, SailthruError, SignatureAlgorithm};
use support::init_tracing;

fn client(transport: Arc<RecordingTransport>) -> ApiClient {
    init_tracing();
    let config = ClientConfig::new("key-123", "s3cr3t").with_api_uri("http://localhost:9/");
    ApiClient::new(&config, transport).unwrap()
}

#[test]
fn signature_is_stable_and_value_sensitive() {
    let params = ParameterMap::new().with("email", "a@b.com").with("template", "welcome");
    let reordered = ParameterMap::new().with("template", "welcome").with("email", "a@b.com");

    assert_eq!(sign(&params, "s3cr3t"), "b9f0bdce0da0be5146241343366f0d81");
    assert_eq!(sign(&params, "s3cr3t"), sign(&reordered, "s3cr3t"));

    let changed = params.clone().with("template", "welcome2");
    assert_eq!(sign(&changed, "s3cr3t"), "d90437e83bd1365df6f17d002d5842e7");
}

#[test]
fn get_query_string_ends_with_signature() {
    let transport = Arc::new(RecordingTransport::new());
    let client = client(transport.clone());

    let response = client
        .api_get("list", ParameterMap::new().with("list", "vip").with("format", "json"))
        .unwrap();
    assert_eq!(response, ApiResponse::Structured(serde_json::json!({})));

    let request = transport.last_request().unwrap();
    let (endpoint, query) = request.url().split_once('?').unwrap();
    assert_eq!(endpoint, "http://localhost:9/list");

    let names: Vec<&str> = query.split('&').map(|pair| pair.split('=').next().unwrap_or("")).collect();
    assert_eq!(names, vec!["list", "format", "api_key", "sig"]);
    assert!(query.starts_with("list=vip&format=json&api_key=key-123&sig="));

    let sent = parse_form(query);
    assert!(client.verify_inbound_signature(&sent, &["list", "api_key"]));
}

#[test]
fn empty_body_is_a_transport_error() {
    let transport = Arc::new(RecordingTransport::with_body(""));
    let client = client(transport.clone());
    let err = client.api_get("send", ParameterMap::new().with("send_id", "abc")).unwrap_err();

    match err {
        SailthruError::Transport { url, message } => {
            assert_eq!(url, "http://localhost:9/send");
            assert_eq!(message, "empty response body");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn transport_failures_surface_unchanged() {
    let transport = Arc::new(RecordingTransport::new());
    transport.push_response(Err(SailthruError::transport("http://localhost:9/send", "connection refused")));
    let client = client(transport);

    let err = client.api_get("send", ParameterMap::new()).unwrap_err();
    assert_eq!(err, SailthruError::transport("http://localhost:9/send", "connection refused"));
}

#[test]
fn malformed_json_body_is_returned_verbatim() {
    let client = client(Arc::new(RecordingTransport::with_body("not json")));
    let response = client.api_post("email", ParameterMap::new().with("email", "a@b.com")).unwrap();
    assert_eq!(response, ApiResponse::Raw("not json".to_string()));
}

#[test]
fn optout_postback_round_trip() {
    let client = client(Arc::new(RecordingTransport::new()));
    let sig = sign(&ParameterMap::new().with("action", "optout").with("email", "a@b.com"), "s3cr3t");
    let body = format!("action=optout&email=a%40b.com&sig={sig}");

    let fields = parse_form(&body);
    assert!(client.verify_postback(&fields, PostbackKind::Optout));
    assert!(!client.verify_postback(&fields, PostbackKind::Verify));
    assert_eq!(client.signature_algorithm(), SignatureAlgorithm::Md5);
}
