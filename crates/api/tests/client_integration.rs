//! End-to-end tests for `SailthruClient`
//!
//! **Coverage:**
//! - Commands reach the service signed, over both transports
//! - Verify postbacks trigger a signed send lookup
//! - Remote application errors come back as structured responses
//!
//! **Infrastructure:**
//! - WireMock HTTP server
//! - Blocking client driven from `spawn_blocking`

use std::sync::Once;

use sailthru_api::{
    ClientConfig, ParameterMap, SailthruClient, SendRequest, TransportPreference,
};
use sailthru_core::signing::sign;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "key-123";
const SECRET: &str = "s3cr3t";

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn config(uri: &str, transport: TransportPreference) -> ClientConfig {
    ClientConfig::new(API_KEY, SECRET).with_api_uri(uri).with_transport(transport)
}

/// Transports compiled into this build.
fn transports() -> Vec<TransportPreference> {
    let mut transports = vec![TransportPreference::Socket];
    if cfg!(feature = "reqwest-transport") {
        transports.push(TransportPreference::Reqwest);
    }
    transports
}

async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[tokio::test]
async fn get_send_is_signed_over_every_transport() {
    init_tracing();
    let server = MockServer::start().await;
    let expected_sig =
        sign(&ParameterMap::new().with("send_id", "TE8EZ3").with("api_key", API_KEY).with("format", "json"), SECRET);
    Mock::given(method("GET"))
        .and(path("/send"))
        .and(query_param("send_id", "TE8EZ3"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("sig", expected_sig.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"send_id":"TE8EZ3","email":"a@b.com"}"#))
        .expect(transports().len() as u64)
        .mount(&server)
        .await;

    for transport in transports() {
        let config = config(&server.uri(), transport);
        let response = run_blocking(move || SailthruClient::new(config)?.get_send("TE8EZ3"))
            .await
            .unwrap_or_else(|err| panic!("{transport:?} failed: {err}"));

        assert_eq!(response.get_str("email"), Some("a@b.com"), "{transport:?}");
    }
}

#[tokio::test]
async fn send_posts_signed_form() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_string_contains("template=welcome&email=a%40b.com&vars%5Bname%5D=Bob&api_key=key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"send_id":"TE8EZ3"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server.uri(), TransportPreference::Socket);
    let response = run_blocking(move || {
        let request = SendRequest::new("welcome", "a@b.com").with_vars(ParameterMap::new().with("name", "Bob"));
        SailthruClient::new(config)?.send(request)
    })
    .await
    .unwrap();

    assert_eq!(response.get_str("send_id"), Some("TE8EZ3"));
}

#[tokio::test]
async fn verify_postback_looks_up_the_send() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/send"))
        .and(query_param("send_id", "TE8EZ3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"send_id":"TE8EZ3","email":"a@b.com"}"#))
        .expect(2)
        .mount(&server)
        .await;

    let config = config(&server.uri(), TransportPreference::Socket);
    let (genuine, hijacked) = run_blocking(move || {
        let client = SailthruClient::new(config)?;
        let fields = |email: &str| {
            let fields = ParameterMap::new().with("action", "verify").with("email", email).with("send_id", "TE8EZ3");
            let sig = sign(&fields, SECRET);
            fields.with("sig", sig)
        };
        Ok::<_, sailthru_api::SailthruError>((
            client.receive_verify_post(&fields("a@b.com"))?,
            client.receive_verify_post(&fields("other@b.com"))?,
        ))
    })
    .await
    .unwrap();

    assert!(genuine);
    assert!(!hijacked);
}

#[tokio::test]
async fn application_errors_are_structured_responses() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":99,"errormsg":"Invalid list"}"#))
        .mount(&server)
        .await;

    let config = config(&server.uri(), TransportPreference::Socket);
    let response = run_blocking(move || SailthruClient::new(config)?.get_list("nope", Some("json"))).await.unwrap();

    assert!(response.is_error());
    assert_eq!(response.error_code(), Some(99));
    assert_eq!(response.error_message(), Some("Invalid list"));
}
