//! Mock implementations for testing.
//!
//! This module provides the canned-response transport, enabling unit testing
//! of HTTP-based code without network dependencies.
//!
//! # Available Mocks
//!
//! - [`MockTransport`] - transport that always returns one fixed response
//! - [`new_mock_client`] - builds a [`Client`](crate::Client) around it

pub mod http;

pub use http::{new_mock_client, Header, MockTransport, ResponseSpec};
