//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Transport`] - the request-execution hook a [`Client`](crate::Client) dispatches through

pub mod http;

pub use http::{fold_headers, Body, BodyStream, HeaderMap, HttpError, Request, Response, Transport};
