//! Reqwest-based HTTP transport adapter.
//!
//! This module provides the real, networked transport behind the default
//! [`Client`](crate::Client), implementing the [`Transport`] trait from
//! `crate::traits`.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::traits::{fold_headers, Body, HeaderMap, HttpError, Request, Response, Transport};

/// HTTP transport implementation using reqwest.
///
/// This adapter wraps a `reqwest::Client` and performs real network I/O.
///
/// # Example
///
/// ```ignore
/// use hcmock::adapters::ReqwestTransport;
/// use hcmock::traits::{Request, Transport};
///
/// let transport = ReqwestTransport::new();
/// let response = transport.round_trip(Request::get("https://example.com")).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestTransport with a custom reqwest::Client.
    ///
    /// This allows for advanced configuration like custom timeouts,
    /// connection pools, or TLS settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our HeaderMap, keeping repeated values.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> HeaderMap {
        fold_headers(headers.iter().filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        }))
    }

    /// Render a status code as `"<code> <reason>"`, e.g. `"200 OK"`.
    fn status_text(status: reqwest::StatusCode) -> String {
        match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        }
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn round_trip(&self, request: Request) -> Result<Response, HttpError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        tracing::trace!(method = %request.method, url = %url, "sending request");

        let builder = self.client.request(request.method, url).body(request.body);
        let builder = Self::apply_headers(builder, &request.headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status_code = response.status();
        let headers = Self::convert_headers(response.headers());
        let content_length = response.content_length();

        tracing::debug!(status = status_code.as_u16(), ?content_length, "received response");

        let stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout(e.to_string())
                } else {
                    HttpError::Io(e.to_string())
                }
            })
        });

        Ok(Response {
            status: Self::status_text(status_code),
            status_code: status_code.as_u16(),
            headers,
            body: Body::from_stream(stream),
            content_length,
        })
    }
}
