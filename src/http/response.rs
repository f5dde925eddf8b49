//! Response composition.
//!
//! # Responsibilities
//! - Copy the origin's status, reason phrase and headers onto the reply
//! - Attach percent-encoded debug metadata (header-driven mode)
//! - Attach the origin content type (descriptor mode)
//!
//! # Design Decisions
//! - Origin headers are never rewritten; repeated `set-cookie` stay distinct
//! - Hop-by-hop framing headers are left for the server to regenerate
//! - A non-canonical reason phrase rides on hyper's `ReasonPhrase` extension

use axum::body::Body;
use axum::http::header::InvalidHeaderName;
use axum::http::{HeaderName, HeaderValue};
use axum::response::Response;
use hyper::ext::ReasonPhrase;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::config::ControlConfig;
use crate::forward::ResponseDescriptor;
use crate::headers::ParsedCookies;

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const HOP_BY_HOP: &[&str] = &["connection", "keep-alive", "transfer-encoding"];

/// Diagnostics attached to header-driven replies.
#[derive(Debug, Clone, Serialize)]
pub struct DebugMetadata {
    pub cookies: ParsedCookies,
    pub url: String,
}

impl DebugMetadata {
    pub fn new(cookies: ParsedCookies, url: impl Into<String>) -> Self {
        Self {
            cookies,
            url: url.into(),
        }
    }

    /// JSON text, percent-encoded as `encodeURIComponent` would.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(utf8_percent_encode(&json, URI_COMPONENT).to_string())
    }
}

/// Builds client responses from origin responses.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    debug_header: HeaderName,
    content_type_header: HeaderName,
}

impl ResponseComposer {
    pub fn new(control: &ControlConfig) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            debug_header: HeaderName::from_bytes(control.debug_header.as_bytes())?,
            content_type_header: HeaderName::from_bytes(control.content_type_header.as_bytes())?,
        })
    }

    /// Copy `response` verbatim, adding the debug header when `extras` is given.
    pub fn compose(&self, response: ResponseDescriptor, extras: Option<&DebugMetadata>) -> Response {
        let ResponseDescriptor {
            status,
            status_text,
            headers,
            body,
        } = response;

        let mut res = Response::new(Body::from(body));
        *res.status_mut() = status;

        if !status_text.is_empty() && status.canonical_reason() != Some(status_text.as_str()) {
            match ReasonPhrase::try_from(status_text.as_bytes()) {
                Ok(reason) => {
                    res.extensions_mut().insert(reason);
                }
                Err(_) => tracing::warn!(status_text = %status_text, "Dropping invalid reason phrase"),
            }
        }

        let out = res.headers_mut();
        for (name, value) in headers.into_list().iter() {
            if HOP_BY_HOP.contains(&name) {
                continue;
            }
            match HeaderName::from_bytes(name.as_bytes()) {
                Ok(name) => {
                    out.append(name, value.clone());
                }
                Err(_) => tracing::warn!(header = %name, "Skipping unrepresentable origin header"),
            }
        }

        // The reserved prefix owns the debug header name on replies as well.
        if let Some(metadata) = extras {
            match metadata.encode().map(HeaderValue::try_from) {
                Ok(Ok(value)) => {
                    if out.insert(self.debug_header.clone(), value).is_some() {
                        tracing::debug!(header = %self.debug_header, "Replaced origin header with debug metadata");
                    }
                }
                _ => tracing::warn!("Failed to encode debug metadata"),
            }
        }

        res
    }

    /// Compose a descriptor-mode reply: headers as given plus the origin content type.
    pub fn compose_descriptor(&self, response: ResponseDescriptor) -> Response {
        let content_type = response.content_type().unwrap_or_default();
        let mut res = self.compose(response, None);
        match HeaderValue::from_str(&content_type) {
            Ok(value) => {
                res.headers_mut().insert(self.content_type_header.clone(), value);
            }
            Err(_) => tracing::warn!(content_type = %content_type, "Origin content type is not a valid header value"),
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::{parse_cookies, FlatHeaders, HeaderList, HeaderSet};
    use axum::body::{to_bytes, Bytes};
    use axum::http::StatusCode;
    use percent_encoding::percent_decode_str;

    fn composer() -> ResponseComposer {
        ResponseComposer::new(&ControlConfig::default()).unwrap()
    }

    fn descriptor(status: StatusCode, headers: HeaderSet, body: &'static str) -> ResponseDescriptor {
        ResponseDescriptor {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_status_headers_and_body_copied() {
        let headers: HeaderList = [
            ("location", "https://example.com/x"),
            ("set-cookie", "a=1; Path=/"),
            ("set-cookie", "b=2; Path=/"),
            ("transfer-encoding", "chunked"),
        ]
        .into_iter()
        .collect();

        let res = composer().compose(descriptor(StatusCode::FOUND, HeaderSet::List(headers), "moved"), None);

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()["location"], "https://example.com/x");
        let cookies: Vec<_> = res.headers().get_all("set-cookie").iter().collect();
        assert_eq!(cookies, vec!["a=1; Path=/", "b=2; Path=/"]);
        assert!(res.headers().get("transfer-encoding").is_none());
        assert!(res.headers().get("x-sfetch-extras").is_none());
        assert!(res.extensions().get::<ReasonPhrase>().is_none());

        let body = to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"moved");
    }

    #[test]
    fn test_non_utf8_origin_header_copied_byte_for_byte() {
        let raw: &[u8] = b"attachment; filename=caf\xe9.txt";
        let mut headers = HeaderList::new();
        headers.append_raw("content-disposition", HeaderValue::from_bytes(raw).unwrap());

        let res = composer().compose(descriptor(StatusCode::OK, HeaderSet::List(headers), ""), None);
        assert_eq!(res.headers()["content-disposition"].as_bytes(), raw);
    }

    #[test]
    fn test_debug_header_replaces_origin_header_of_same_name() {
        let headers: HeaderList = [("x-sfetch-extras", "from-origin"), ("x-other", "1")].into_iter().collect();
        let metadata = DebugMetadata::new(ParsedCookies::default(), "https://origin.test/");

        let res = composer().compose(descriptor(StatusCode::OK, HeaderSet::List(headers), ""), Some(&metadata));
        let values: Vec<_> = res.headers().get_all("x-sfetch-extras").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], metadata.encode().unwrap().as_str());
        assert_eq!(res.headers()["x-other"], "1");
    }

    #[test]
    fn test_debug_metadata_is_percent_encoded_json() {
        let metadata = DebugMetadata::new(parse_cookies(Some("a=1; b=2")), "https://origin.test/");
        let res = composer().compose(descriptor(StatusCode::OK, HeaderSet::default(), ""), Some(&metadata));

        let raw = res.headers()["x-sfetch-extras"].to_str().unwrap();
        assert!(!raw.contains('{') && !raw.contains('"'));
        let decoded = percent_decode_str(raw).decode_utf8().unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["cookies"]["a"], "1");
        assert_eq!(value["cookies"]["b"], "2");
        assert_eq!(value["url"], "https://origin.test/");
    }

    #[test]
    fn test_encoding_matches_uri_component() {
        let metadata = DebugMetadata::new(ParsedCookies::default(), "https://o.test/a b?x=(1)");
        assert_eq!(
            metadata.encode().unwrap(),
            "%7B%22cookies%22%3A%7B%7D%2C%22url%22%3A%22https%3A%2F%2Fo.test%2Fa%20b%3Fx%3D(1)%22%7D"
        );
    }

    #[test]
    fn test_custom_reason_phrase_kept() {
        let mut response = descriptor(StatusCode::OK, HeaderSet::default(), "");
        response.status_text = "Everything Fine".to_string();

        let res = composer().compose(response, None);
        let reason = res.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(reason.as_bytes(), b"Everything Fine");
    }

    #[test]
    fn test_descriptor_reply_carries_content_type_and_flat_cookies() {
        let mut flat = FlatHeaders::new();
        flat.insert("Content-Type", "application/json");
        flat.insert("set-cookie", "a=1");
        flat.insert("set-cookie", "b=2");

        let res = composer().compose_descriptor(descriptor(StatusCode::CREATED, HeaderSet::Flat(flat), "{}"));

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()["x-sfetch-content-type"], "application/json");
        assert_eq!(res.headers().get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn test_descriptor_reply_without_content_type() {
        let res = composer().compose_descriptor(descriptor(StatusCode::NO_CONTENT, HeaderSet::default(), ""));
        assert_eq!(res.headers()["x-sfetch-content-type"], "");
    }
}
