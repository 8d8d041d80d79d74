//! Client handle over a pluggable transport.
//!
//! A [`Client`] is what code under test holds. It never performs I/O itself;
//! every request goes through the [`Transport`] it was built with, so tests
//! inject a mock transport and production code keeps the reqwest one.

use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

use crate::adapters::ReqwestTransport;
use crate::traits::{HttpError, Request, Response, Transport};

/// HTTP client handle.
///
/// Cloning is cheap and clones share the same transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client backed by the real reqwest transport.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Create a client that dispatches through `transport`.
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Execute a request and return its response.
    pub async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        self.transport.round_trip(request).await
    }

    /// Send a GET request to `url`.
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.execute(Request::get(url)).await
    }

    /// Send a POST request to `url` with `body`.
    pub async fn post(&self, url: &str, body: impl Into<Bytes>) -> Result<Response, HttpError> {
        self.execute(Request::post(url, body)).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
