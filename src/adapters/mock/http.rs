//! Mock HTTP transport for testing.
//!
//! Provides a transport that answers every request with the same canned
//! response, and the [`new_mock_client`] factory that wires it into a
//! [`Client`].

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::traits::{fold_headers, Body, HeaderMap, HttpError, Request, Response, Transport};

/// A single response header. Keys may repeat within a [`ResponseSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name
    pub key: String,
    /// Header value
    pub value: String,
}

impl Header {
    /// Create a header.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Description of the fixed response a mock client returns.
///
/// An empty `status` and an empty `body` are both valid; an absent body is
/// the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSpec {
    /// Free-form status text, e.g. `"200 OK"`
    pub status: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response headers in order; repeated keys keep every value
    pub headers: Vec<Header>,
    /// Response body
    pub body: Bytes,
}

impl ResponseSpec {
    /// Create a spec with the given status code, no status text, no headers
    /// and an empty body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    /// Set the status text.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Append a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Fold the spec's headers into a [`HeaderMap`].
    pub fn header_map(&self) -> HeaderMap {
        fold_headers(
            self.headers
                .iter()
                .map(|h| (h.key.as_str(), h.value.as_str())),
        )
    }
}

/// Transport that ignores the request and returns a canned response.
///
/// The header map is folded once at construction. Each call hands out a
/// fresh [`Body`] over the same shared bytes, so concurrent callers never
/// observe each other's reads.
///
/// # Example
///
/// ```ignore
/// use hcmock::adapters::mock::{MockTransport, ResponseSpec};
/// use hcmock::traits::{Request, Transport};
///
/// let transport = MockTransport::new(ResponseSpec::new(204));
/// let response = transport.round_trip(Request::get("http://anything")).await?;
/// assert_eq!(response.status_code, 204);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    spec: ResponseSpec,
    headers: HeaderMap,
}

impl MockTransport {
    /// Create a transport that always answers with `spec`.
    pub fn new(spec: ResponseSpec) -> Self {
        let headers = spec.header_map();
        Self { spec, headers }
    }

    /// The spec this transport answers with.
    pub fn spec(&self) -> &ResponseSpec {
        &self.spec
    }

    /// Build a fresh response from the captured spec.
    pub fn respond(&self) -> Response {
        Response {
            status: self.spec.status.clone(),
            status_code: self.spec.status_code,
            headers: self.headers.clone(),
            body: Body::from_bytes(self.spec.body.clone()),
            content_length: Some(self.spec.body.len() as u64),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn round_trip(&self, request: Request) -> Result<Response, HttpError> {
        tracing::trace!(
            method = %request.method,
            url = %request.url,
            status_code = self.spec.status_code,
            "answering with mock response"
        );
        Ok(self.respond())
    }
}

/// Create a client that returns the response described by `spec`.
///
/// Every request sent through the returned client yields an equivalent
/// response regardless of method, URL, headers or body. With `None` the
/// default, networked client is returned instead.
pub fn new_mock_client(spec: Option<ResponseSpec>) -> Client {
    match spec {
        Some(spec) => {
            tracing::debug!(
                status_code = spec.status_code,
                headers = spec.headers.len(),
                body_len = spec.body.len(),
                "creating mock client"
            );
            Client::with_transport(MockTransport::new(spec))
        }
        None => {
            tracing::debug!("no response spec given, using default client");
            Client::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_spec() -> ResponseSpec {
        ResponseSpec::new(200)
            .with_status("test status")
            .with_header("header-1", "value-1-1")
            .with_header("header-1", "value-1-2")
            .with_header("header-2", "value-2")
            .with_body("test response body")
    }

    #[test]
    fn test_response_spec_default() {
        let spec = ResponseSpec::default();
        assert_eq!(spec.status, "");
        assert_eq!(spec.status_code, 0);
        assert!(spec.headers.is_empty());
        assert!(spec.body.is_empty());
    }

    #[test]
    fn test_response_spec_builders() {
        let spec = full_spec();
        assert_eq!(spec.status, "test status");
        assert_eq!(spec.status_code, 200);
        assert_eq!(spec.headers.len(), 3);
        assert_eq!(spec.headers[0], Header::new("header-1", "value-1-1"));
        assert_eq!(spec.body, Bytes::from("test response body"));
    }

    #[test]
    fn test_header_map_folds_repeated_keys() {
        let headers = full_spec().header_map();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["header-1"], vec!["value-1-1", "value-1-2"]);
        assert_eq!(headers["header-2"], vec!["value-2"]);
    }

    #[test]
    fn test_respond_populates_every_field() {
        let transport = MockTransport::new(full_spec());
        let response = transport.respond();
        assert_eq!(response.status, "test status");
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers, full_spec().header_map());
        assert_eq!(response.content_length, Some(18));
    }

    #[tokio::test]
    async fn test_round_trip_returns_body() {
        let transport = MockTransport::new(full_spec());
        let response = transport
            .round_trip(Request::get("http://example.com"))
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "test response body");
    }

    #[tokio::test]
    async fn test_round_trip_with_empty_body() {
        let transport = MockTransport::new(ResponseSpec::new(204));
        let response = transport
            .round_trip(Request::get("http://example.com"))
            .await
            .unwrap();
        assert_eq!(response.content_length, Some(0));
        assert!(response.headers.is_empty());
        assert!(response.bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_ignores_request() {
        let transport = MockTransport::new(full_spec());

        let first = transport
            .round_trip(Request::get("http://example.com/a"))
            .await
            .unwrap();
        let second = transport
            .round_trip(
                Request::post("https://other.example/b", "payload")
                    .with_header("Authorization", "Bearer token"),
            )
            .await
            .unwrap();

        assert_eq!(first.status, second.status);
        assert_eq!(first.status_code, second.status_code);
        assert_eq!(first.headers, second.headers);
        assert_eq!(first.content_length, second.content_length);
        assert_eq!(first.bytes().await.unwrap(), second.bytes().await.unwrap());
    }

    #[tokio::test]
    async fn test_spec_is_not_consumed_by_reads() {
        let transport = MockTransport::new(full_spec());
        for _ in 0..3 {
            let response = transport.respond();
            assert_eq!(response.bytes().await.unwrap().len(), 18);
        }
        assert_eq!(transport.spec(), &full_spec());
    }

    #[tokio::test]
    async fn test_new_mock_client_with_spec() {
        let client = new_mock_client(Some(full_spec()));
        let response = client
            .execute(Request::get("http://127.0.0.1:59999/never-dialed"))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.text().await.unwrap(), "test response body");
    }

    #[test]
    fn test_mock_transport_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockTransport>();
    }
}
