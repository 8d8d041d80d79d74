//! JSON fixtures for canned responses.
//!
//! A fixture is a JSON document describing a [`ResponseSpec`], so canned
//! responses can be kept as files next to the tests that use them:
//!
//! ```json
//! {
//!   "status": "200 OK",
//!   "status_code": 200,
//!   "headers": [{ "key": "content-type", "value": "application/json" }],
//!   "body": "{\"ok\":true}"
//! }
//! ```
//!
//! Binary bodies go in `body_base64` instead of `body`.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::adapters::mock::{new_mock_client, Header, ResponseSpec};
use crate::client::Client;

/// Error type for fixture loading.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be opened
    #[error("Failed to read fixture {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid fixture
    #[error("Invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// `body_base64` is not valid base64
    #[error("Invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Both `body` and `body_base64` were given
    #[error("Fixture sets both body and body_base64")]
    ConflictingBody,
}

/// On-disk shape of a fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseFixture {
    #[serde(default)]
    pub status: String,
    pub status_code: u16,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_base64: Option<String>,
}

impl TryFrom<ResponseFixture> for ResponseSpec {
    type Error = FixtureError;

    fn try_from(fixture: ResponseFixture) -> Result<Self, Self::Error> {
        let body = match (fixture.body, fixture.body_base64) {
            (Some(_), Some(_)) => return Err(FixtureError::ConflictingBody),
            (Some(text), None) => Bytes::from(text),
            (None, Some(encoded)) => Bytes::from(STANDARD.decode(encoded.trim())?),
            (None, None) => Bytes::new(),
        };

        Ok(ResponseSpec {
            status: fixture.status,
            status_code: fixture.status_code,
            headers: fixture.headers,
            body,
        })
    }
}

impl From<&ResponseSpec> for ResponseFixture {
    fn from(spec: &ResponseSpec) -> Self {
        let (body, body_base64) = if spec.body.is_empty() {
            (None, None)
        } else {
            match std::str::from_utf8(&spec.body) {
                Ok(text) => (Some(text.to_string()), None),
                Err(_) => (None, Some(STANDARD.encode(&spec.body))),
            }
        };

        Self {
            status: spec.status.clone(),
            status_code: spec.status_code,
            headers: spec.headers.clone(),
            body,
            body_base64,
        }
    }
}

impl ResponseSpec {
    /// Parse a spec from a JSON fixture document.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let fixture: ResponseFixture = serde_json::from_str(json)?;
        fixture.try_into()
    }

    /// Render the spec as a JSON fixture document.
    pub fn to_json(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(&ResponseFixture::from(self))?)
    }
}

/// Load a spec from a JSON fixture file.
pub fn load(path: impl AsRef<Path>) -> Result<ResponseSpec, FixtureError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let fixture: ResponseFixture = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), status_code = fixture.status_code, "loaded fixture");
    fixture.try_into()
}

/// Load a fixture file and build a mock client that answers with it.
pub fn load_client(path: impl AsRef<Path>) -> Result<Client, FixtureError> {
    Ok(new_mock_client(Some(load(path)?)))
}
