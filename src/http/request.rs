//! Request ID plumbing.
//!
//! # Responsibilities
//! - Give every inbound request an ID for log correlation
//! - Give handlers a cheap accessor for log fields
//!
//! # Design Decisions
//! - The ID lives in request extensions only; headers are never touched, so
//!   nothing proxy-generated reaches the origin or the reply
//! - A caller-supplied `x-request-id` is reused as the log ID and forwarded
//!   like any other caller header

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Middleware that stores a [`RequestId`] extension on every request.
pub async fn assign_request_id(mut request: Request<Body>, next: Next) -> Response {
    let id = match request.headers().get(X_REQUEST_ID) {
        Some(value) => Some(RequestId::new(value.clone())),
        None => MakeRequestUuidV4.make_request_id(&request),
    };
    if let Some(id) = id {
        request.extensions_mut().insert(id);
    }
    next.run(request).await
}

/// Read the request ID assigned by [`assign_request_id`].
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("unknown")
    }
}
