//! Request handler: the single entry point for every inbound request.
//!
//! # Data Flow
//! ```text
//! header-driven:
//!     resolve_header_target → parse_cookies → Dispatcher::dispatch
//!     → ResponseComposer::compose (+ debug metadata)
//!
//! descriptor:
//!     read body → resolve_descriptor → Dispatcher::dispatch_descriptor
//!     → ResponseComposer::compose_descriptor (+ content type)
//! ```
//!
//! Every failure is turned into a response here; nothing propagates further.

use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::response::{IntoResponse, Response};

use crate::config::ControlConfig;
use crate::error::ProxyError;
use crate::forward::{Dispatcher, ForwardRequest};
use crate::headers::{parse_cookies, COOKIE};
use crate::http::request::RequestIdExt;
use crate::http::response::{DebugMetadata, ResponseComposer};
use crate::observability::metrics;
use crate::routing::{resolve_descriptor, resolve_header_target, InvocationMode};

/// Shared, immutable per-server state.
#[derive(Clone)]
pub struct AppState {
    pub control: Arc<ControlConfig>,
    pub dispatcher: Dispatcher,
    pub composer: Arc<ResponseComposer>,
    pub max_body_size: usize,
}

/// Proxy one request according to its invocation mode.
pub async fn handle(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().to_string();
    let mode = InvocationMode::select(request.headers(), &state.control);

    tracing::debug!(
        request_id = %request_id,
        mode = mode.as_str(),
        method = %request.method(),
        "Handling request"
    );

    let result = match mode {
        InvocationMode::HeaderDriven => proxy_header_driven(&state, request).await,
        InvocationMode::Descriptor => proxy_descriptor(&state, request).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            if matches!(e, ProxyError::Transport(_)) {
                metrics::record_transport_error(mode.as_str());
            }
            tracing::warn!(
                request_id = %request_id,
                mode = mode.as_str(),
                error = %e.diagnostic_trace(),
                "Proxy request failed"
            );
            e.into_response()
        }
    };

    let status = response.status().as_u16();
    metrics::record_request(mode.as_str(), status, start);
    tracing::info!(
        request_id = %request_id,
        mode = mode.as_str(),
        status,
        elapsed = ?start.elapsed(),
        "Request completed"
    );

    response
}

async fn proxy_header_driven(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    // Fail fast before touching the body or the network.
    let target = resolve_header_target(request.headers(), &state.control)?;
    let cookies = parse_cookies(cookie_header(request.headers()).as_deref());

    let (parts, body) = request.into_parts();
    let body = read_body(body, state.max_body_size).await?;

    let forward = ForwardRequest {
        method: parts.method,
        url: target.url.clone(),
        headers: target.headers,
        body: (!body.is_empty()).then_some(body),
    };

    let response = state.dispatcher.dispatch(forward).await?;
    let metadata = DebugMetadata::new(cookies, target.url.as_str());
    Ok(state.composer.compose(response, Some(&metadata)))
}

async fn proxy_descriptor(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let body = read_body(request.into_body(), state.max_body_size).await?;
    let forward = resolve_descriptor(&body)?;

    let response = state.dispatcher.dispatch_descriptor(forward).await?;
    Ok(state.composer.compose_descriptor(response))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    axum::body::to_bytes(body, limit).await.map_err(ProxyError::Body)
}

/// All `Cookie` headers joined, as HTTP/2 clients may split them.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
