//! Request and response descriptors.

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::headers::{HeaderList, HeaderSet};

/// A request descriptor as decoded from a JSON body.
///
/// Only `url` is required; `method` defaults to `GET`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestDescriptor {
    #[serde(default = "default_method")]
    pub method: String,

    pub url: String,

    #[serde(default)]
    pub headers: HeaderSet,

    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// A validated outbound request, ready for the transport.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderList,
    pub body: Option<Bytes>,
}

/// The origin's answer. `status` is the literal origin status.
#[derive(Debug, Clone)]
pub struct ResponseDescriptor {
    pub status: StatusCode,
    pub status_text: String,
    pub headers: HeaderSet,
    pub body: Bytes,
}

impl ResponseDescriptor {
    /// First `content-type` value, in whichever form the headers are held.
    pub fn content_type(&self) -> Option<String> {
        match &self.headers {
            HeaderSet::List(list) => list.get(crate::headers::CONTENT_TYPE).map(str::to_string),
            HeaderSet::Flat(flat) => flat.get(crate::headers::CONTENT_TYPE),
        }
    }
}

/// Reason phrase to report for `status` when the origin sent none of its own.
pub fn canonical_status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
