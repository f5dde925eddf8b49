//! Transport abstraction and its reqwest implementation.
//!
//! # Responsibilities
//! - Perform the network call for a [`ForwardRequest`]
//! - Expose the call policy (redirects, status classification) as plain fields
//! - Hand bodies through as opaque bytes
//!
//! # Design Decisions
//! - No deadline is enforced here: the client is built without a request
//!   timeout, so a call waits as long as reqwest/hyper defaults allow
//! - reqwest is built without decompression features, bodies are never decoded
//! - Only network-level failures are errors under the transparent policy

use axum::http::StatusCode;
use futures_util::future::BoxFuture;
use hyper::ext::ReasonPhrase;
use reqwest::redirect;
use thiserror::Error;

use crate::config::TransportConfig;
use crate::forward::types::{canonical_status_text, ForwardRequest, ResponseDescriptor};
use crate::headers::{HeaderList, HeaderSet};

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// Connect, DNS, I/O or protocol failure while talking to the origin.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status while `accept_all_statuses` is off.
    #[error("origin {url} responded with status {status}")]
    Status { url: String, status: StatusCode },
}

/// How the transport treats redirects and status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportPolicy {
    /// Chase 3xx `Location` headers automatically.
    pub follow_redirects: bool,
    /// Treat every origin status as a successful transport outcome.
    pub accept_all_statuses: bool,
}

impl TransportPolicy {
    /// Return the origin's literal response: no redirects, no status errors.
    pub const fn transparent() -> Self {
        Self {
            follow_redirects: false,
            accept_all_statuses: true,
        }
    }

    pub fn is_transparent(&self) -> bool {
        *self == Self::transparent()
    }
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self::transparent()
    }
}

/// Performs outbound calls.
pub trait Transport: Send + Sync {
    fn policy(&self) -> &TransportPolicy;

    fn send(&self, request: ForwardRequest) -> BoxFuture<'_, Result<ResponseDescriptor, TransportError>>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    policy: TransportPolicy,
}

impl ReqwestTransport {
    pub fn new(policy: TransportPolicy, config: &TransportConfig) -> Result<Self, TransportError> {
        let redirect_policy = if policy.follow_redirects {
            redirect::Policy::default()
        } else {
            redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder().redirect(redirect_policy);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().map_err(TransportError::Build)?;

        tracing::debug!(
            follow_redirects = policy.follow_redirects,
            accept_all_statuses = policy.accept_all_statuses,
            "Transport initialized"
        );

        Ok(Self { client, policy })
    }
}

impl Transport for ReqwestTransport {
    fn policy(&self) -> &TransportPolicy {
        &self.policy
    }

    fn send(&self, request: ForwardRequest) -> BoxFuture<'_, Result<ResponseDescriptor, TransportError>> {
        Box::pin(async move {
            let url = request.url.to_string();

            let mut builder = self
                .client
                .request(request.method, request.url)
                .headers(request.headers.to_header_map());
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

            let status = response.status();
            if !self.policy.accept_all_statuses && !status.is_success() {
                return Err(TransportError::Status { url, status });
            }

            // hyper only records a reason phrase when it differs from the canonical one.
            let status_text = response
                .extensions()
                .get::<ReasonPhrase>()
                .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
                .map(str::to_string)
                .unwrap_or_else(|| canonical_status_text(status));
            let headers = HeaderList::from_header_map(response.headers());

            let body = response
                .bytes()
                .await
                .map_err(|source| TransportError::Request { url, source })?;

            Ok(ResponseDescriptor {
                status,
                status_text,
                headers: HeaderSet::List(headers),
                body,
            })
        })
    }
}
