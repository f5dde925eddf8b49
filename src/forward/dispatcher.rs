//! Forward dispatcher.
//!
//! # Responsibilities
//! - Hand a validated request to the transport
//! - Return the origin's response untouched, whatever its status
//! - Convert response headers to flat form for descriptor replies
//!
//! # Design Decisions
//! - No retries: a transport failure is returned to the caller as-is
//! - Policy lives on the transport; a non-transparent one is logged at startup

use std::sync::Arc;

use crate::forward::transport::{Transport, TransportError, TransportPolicy};
use crate::forward::types::{ForwardRequest, ResponseDescriptor};
use crate::headers::HeaderSet;

/// Issues outbound requests through a shared [`Transport`].
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        if !transport.policy().is_transparent() {
            tracing::warn!(
                policy = ?transport.policy(),
                "Transport policy is not transparent; callers may not see the literal origin response"
            );
        }
        Self { transport }
    }

    pub fn policy(&self) -> &TransportPolicy {
        self.transport.policy()
    }

    /// Send `request`; the response keeps list-form headers.
    pub async fn dispatch(&self, request: ForwardRequest) -> Result<ResponseDescriptor, TransportError> {
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self.transport.send(request).await?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = response.status.as_u16(),
            "Origin responded"
        );
        Ok(response)
    }

    /// Send `request`; the response headers come back in flat form.
    pub async fn dispatch_descriptor(
        &self,
        request: ForwardRequest,
    ) -> Result<ResponseDescriptor, TransportError> {
        let mut response = self.dispatch(request).await?;
        response.headers = HeaderSet::Flat(response.headers.into_flat());
        Ok(response)
    }
}
