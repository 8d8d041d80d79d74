//! hcmock - an HTTP client test double
//!
//! [`new`] turns a [`ResponseSpec`] into a [`Client`] that answers every
//! request with that fixed response and never touches the network. Passing
//! `None` returns the default, networked client instead.
//!
//! ```ignore
//! use hcmock::{Request, ResponseSpec};
//!
//! let client = hcmock::new(Some(
//!     ResponseSpec::new(200)
//!         .with_status("200 OK")
//!         .with_header("content-type", "text/plain")
//!         .with_body("hello"),
//! ));
//!
//! let response = client.execute(Request::get("https://example.com")).await?;
//! assert_eq!(response.text().await?, "hello");
//! ```

pub mod adapters;
pub mod client;
pub mod fixture;
pub mod traits;

pub use adapters::mock::{new_mock_client as new, Header, MockTransport, ResponseSpec};
pub use adapters::ReqwestTransport;
pub use client::Client;
pub use fixture::FixtureError;
pub use reqwest::Method;
pub use traits::{Body, HeaderMap, HttpError, Request, Response, Transport};
