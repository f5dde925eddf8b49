//! Request-path error taxonomy and its HTTP mapping.

use std::error::Error as StdError;
use std::fmt::Write as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::forward::TransportError;

/// Body sent for a missing or non-http(s) target.
pub const INVALID_URL_BODY: &str = "Invalid URL";

/// Body sent when a handler panics.
pub const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// Errors raised while handling one proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Header-driven target missing or not an absolute http(s) URL.
    #[error("Invalid URL")]
    InvalidTarget,

    /// Descriptor-mode body is not a usable request descriptor.
    #[error("invalid request descriptor: {0}")]
    InvalidDescriptor(String),

    /// The outbound call could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The inbound body could not be read.
    #[error("failed to read request body")]
    Body(#[source] axum::Error),
}

impl ProxyError {
    /// The error followed by its `source()` chain, one cause per line.
    pub fn diagnostic_trace(&self) -> String {
        let mut trace = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let _ = write!(trace, "\n  caused by: {}", cause);
            source = cause.source();
        }
        trace
    }
}

/// Every recognised failure is the caller's request going wrong, hence `400`.
/// Only panics, handled by the server's panic layer, map to `500`.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::InvalidTarget => INVALID_URL_BODY.to_string(),
            other => other.diagnostic_trace(),
        };
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_invalid_target_has_fixed_body() {
        let res = ProxyError::InvalidTarget.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Invalid URL");
    }

    #[tokio::test]
    async fn test_trace_includes_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stream closed");
        let err = ProxyError::Body(axum::Error::new(io));

        let trace = err.diagnostic_trace();
        assert!(trace.starts_with("failed to read request body"));
        assert!(trace.contains("caused by: stream closed"), "trace was: {trace}");

        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_every_recognised_error_is_bad_request() {
        let errors = [
            ProxyError::InvalidTarget,
            ProxyError::InvalidDescriptor("bad".into()),
            ProxyError::Transport(TransportError::Status {
                url: "http://origin.test/".into(),
                status: StatusCode::BAD_GATEWAY,
            }),
        ];
        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_descriptor_error_message() {
        let err = ProxyError::InvalidDescriptor("missing field `url`".into());
        assert_eq!(err.diagnostic_trace(), "invalid request descriptor: missing field `url`");
    }
}
