//! Concrete implementations of the [`Transport`](crate::traits::Transport) trait.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - real HTTP transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides the test double:
//! - [`mock::MockTransport`] - fixed, injectable responses

pub mod mock;
pub mod reqwest_http;

pub use mock::{new_mock_client, Header, MockTransport, ResponseSpec};
pub use reqwest_http::ReqwestTransport;
