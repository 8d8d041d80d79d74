//! Common test utilities for integration tests.
//!
//! Provides tracing setup, canned response specs and a wiremock server
//! standing in for a real endpoint.

use hcmock::ResponseSpec;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Install a tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hcmock=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Headers with a repeated key, as used across the scenarios.
pub fn test_headers(spec: ResponseSpec) -> ResponseSpec {
    spec.with_header("header-1", "value-1-1")
        .with_header("header-1", "value-1-2")
        .with_header("header-2", "value-2")
}

/// Start a server that answers every GET with status 200 and body `"test"`.
#[allow(dead_code)]
pub async fn start_test_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("test"))
        .mount(&server)
        .await;
    server
}
