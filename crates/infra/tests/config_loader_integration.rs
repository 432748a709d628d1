//! Integration tests for configuration loading and transport selection
//!
//! Loads a config file, builds the transport it asks for, and issues a
//! signed request against a WireMock server.

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::io::Write;
use std::path::PathBuf;

use sailthru_core::ApiClient;
use sailthru_domain::{ApiResponse, ClientConfig, SailthruError, TransportPreference};
use sailthru_infra::{config, select_transport};
use serde_json::json;
use support::{init_tracing, run_blocking};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[tokio::test]
async fn test_loaded_config_drives_signed_request() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/send"))
        .and(query_param("send_id", "TE8EZ3"))
        .and(query_param("api_key", "key-123"))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"send_id":"TE8EZ3","email":"a@b.com"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let path = write_config(
        &format!(
            r#"
api_key = "key-123"
secret = "s3cr3t"
api_uri = "{}/"
transport = "socket"
timeout_secs = 5
"#,
            server.uri()
        ),
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    std::fs::remove_file(path).ok();
    assert_eq!(config.transport, TransportPreference::Socket);

    let response = run_blocking(move || {
        let transport = select_transport(&config)?;
        let client = ApiClient::new(&config, transport)?;
        assert_eq!(client.transport_name(), "socket");
        client.api_get("send", sailthru_domain::ParameterMap::new().with("send_id", "TE8EZ3"))
    })
    .await
    .expect("request should succeed");

    assert_eq!(response, ApiResponse::Structured(json!({"send_id": "TE8EZ3", "email": "a@b.com"})));
}

#[tokio::test]
async fn test_auto_selection_matches_socket_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(2)
        .mount(&server)
        .await;

    let base = ClientConfig::new("key-123", "s3cr3t").with_api_uri(server.uri());
    let mut responses = Vec::new();
    for preference in [TransportPreference::Auto, TransportPreference::Socket] {
        let config = base.clone().with_transport(preference);
        let response = run_blocking(move || {
            let client = ApiClient::new(&config, select_transport(&config)?)?;
            client.api_post("email", sailthru_domain::ParameterMap::new().with("email", "a@b.com"))
        })
        .await
        .expect("request should succeed");
        responses.push(response);
    }

    assert_eq!(responses[0], ApiResponse::Raw("not json".to_string()));
    assert_eq!(responses[0], responses[1]);

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].body, received[1].body);
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some(PathBuf::from("/nonexistent/sailthru.toml")));
    assert!(matches!(result, Err(SailthruError::Config(_))));
}

#[test]
fn test_load_config_with_minimal_fields() {
    let path = write_config(r#"{"api_key": "key-123", "secret": "s3cr3t"}"#, "json");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("minimal config should load");
    assert_eq!(config, ClientConfig::new("key-123", "s3cr3t"));
}
