//! HTTP transport trait abstraction.
//!
//! Provides the request and response types shared by every transport, and the
//! single-method [`Transport`] trait that a [`Client`](crate::Client) dispatches
//! through. Swapping the transport is how the mock client bypasses the network.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::future;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use reqwest::Method;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;

/// Response headers: each key maps to every value received for it, in order.
pub type HeaderMap = HashMap<String, Vec<String>>;

/// Boxed stream of body chunks.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Fold ordered `(key, value)` pairs into a [`HeaderMap`].
///
/// The first occurrence of a key creates a single-element list and later
/// occurrences append to it, so values keep their input order.
pub fn fold_headers<I, K, V>(pairs: I) -> HeaderMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut headers = HeaderMap::new();
    for (key, value) in pairs {
        headers.entry(key.into()).or_default().push(value.into());
    }
    headers
}

/// HTTP transport errors.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// IO error while reading a body
    #[error("IO error: {0}")]
    Io(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// An outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Target URL
    pub url: String,
    /// Request headers, in the order they were added
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Bytes,
}

impl Request {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request carrying `body`.
    pub fn post(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::new(Method::POST, url).with_body(body)
    }

    /// Append a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// A readable response body.
///
/// The body is a stream of byte chunks. It is released when dropped, so a
/// caller that stops reading early just lets it go out of scope.
pub struct Body {
    inner: BodyStream,
}

impl Body {
    /// A body that yields `bytes` as a single chunk, or nothing when empty.
    pub fn from_bytes(bytes: Bytes) -> Self {
        if bytes.is_empty() {
            return Self::empty();
        }
        Self {
            inner: Box::pin(stream::once(future::ready(Ok::<_, HttpError>(bytes)))),
        }
    }

    /// A body that yields no bytes.
    pub fn empty() -> Self {
        Self {
            inner: Box::pin(stream::empty::<Result<Bytes, HttpError>>()),
        }
    }

    /// Wrap an arbitrary chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, HttpError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Read the body to completion.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        let buf = self
            .inner
            .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok::<_, HttpError>(buf)
            })
            .await?;
        Ok(buf.freeze())
    }

    /// Read the body to completion as UTF-8 text.
    pub async fn text(self) -> Result<String, HttpError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| HttpError::Other(e.to_string()))
    }

    /// Unwrap the underlying chunk stream.
    pub fn into_stream(self) -> BodyStream {
        self.inner
    }
}

impl Stream for Body {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

/// HTTP response returned by a [`Transport`].
#[derive(Debug)]
pub struct Response {
    /// Human-readable status line, e.g. `"200 OK"`
    pub status: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Body,
    /// Body length in bytes, when known
    pub content_length: Option<u64>,
}

impl Response {
    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// All values received for a header key.
    pub fn header_values(&self, key: &str) -> &[String] {
        self.headers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read the body to completion.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        self.body.bytes().await
    }

    /// Read the body to completion as UTF-8 text.
    pub async fn text(self) -> Result<String, HttpError> {
        self.body.text().await
    }

    /// Read the body and parse it as JSON.
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, HttpError> {
        let bytes = self.body.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| HttpError::Other(e.to_string()))
    }
}

/// Trait for the request-execution hook behind a client.
///
/// A transport takes a request and produces a response. The production
/// implementation talks to the network; the mock implementation ignores the
/// request and answers with a canned response.
///
/// # Example
///
/// ```ignore
/// use hcmock::traits::{HttpError, Request, Response, Transport};
///
/// async fn status_of<T: Transport>(transport: &T, url: &str) -> Result<u16, HttpError> {
///     let response = transport.round_trip(Request::get(url)).await?;
///     Ok(response.status_code)
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request and return its response.
    async fn round_trip(&self, request: Request) -> Result<Response, HttpError>;
}
