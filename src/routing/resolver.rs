//! Forwarding target resolution.
//!
//! # Responsibilities
//! - Header-driven mode: read the target header, strip reserved headers
//! - Descriptor mode: decode and validate a JSON request descriptor
//!
//! # Design Decisions
//! - Only absolute `http://` and `https://` targets are accepted
//! - Headers the transport regenerates for the new origin (`host`, framing)
//!   are dropped alongside the reserved ones

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use url::Url;

use crate::config::ControlConfig;
use crate::error::ProxyError;
use crate::forward::{ForwardRequest, RequestDescriptor};
use crate::headers::HeaderList;

/// Headers owned by the connection to the origin rather than the request.
const TRANSPORT_MANAGED: &[&str] = &[
    "host",
    "content-length",
    "connection",
    "keep-alive",
    "transfer-encoding",
    "upgrade",
];

/// A resolved header-driven target.
#[derive(Debug, Clone)]
pub struct HeaderTarget {
    pub url: Url,
    /// Inbound headers minus reserved and transport-managed ones.
    pub headers: HeaderList,
}

/// Resolve the target of a header-driven request.
pub fn resolve_header_target(headers: &HeaderMap, control: &ControlConfig) -> Result<HeaderTarget, ProxyError> {
    let raw = headers
        .get(control.target_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .ok_or(ProxyError::InvalidTarget)?;

    let url = parse_http_url(raw).ok_or(ProxyError::InvalidTarget)?;

    let mut forwarded = HeaderList::from_header_map(headers);
    forwarded.remove_where(|name| control.is_reserved(name) || TRANSPORT_MANAGED.contains(&name));

    Ok(HeaderTarget { url, headers: forwarded })
}

/// Decode a descriptor-mode body into a request for the dispatcher.
pub fn resolve_descriptor(body: &[u8]) -> Result<ForwardRequest, ProxyError> {
    let descriptor: RequestDescriptor =
        serde_json::from_slice(body).map_err(|e| ProxyError::InvalidDescriptor(e.to_string()))?;

    let method = Method::from_bytes(descriptor.method.as_bytes())
        .map_err(|_| ProxyError::InvalidDescriptor(format!("invalid method '{}'", descriptor.method)))?;

    let url = parse_http_url(descriptor.url.trim()).ok_or_else(|| {
        ProxyError::InvalidDescriptor(format!("'{}' is not an absolute http(s) URL", descriptor.url))
    })?;

    let mut headers = descriptor.headers.into_list();
    headers.remove_where(|name| TRANSPORT_MANAGED.contains(&name));

    Ok(ForwardRequest {
        method,
        url,
        headers,
        body: descriptor.body.map(Bytes::from),
    })
}

fn parse_http_url(raw: &str) -> Option<Url> {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return None;
    }
    Url::parse(raw).ok().filter(|u| u.has_host())
}
