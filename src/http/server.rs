//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler on every path
//! - Wire up middleware (tracing, request ID, panic recovery)
//! - Build the transport and the shared handler state
//! - Serve until the shutdown broadcast fires

use std::any::Any;
use std::sync::Arc;

use axum::http::header::InvalidHeaderName;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::UNKNOWN_ERROR_BODY;
use crate::forward::{Dispatcher, ReqwestTransport, Transport, TransportError, TransportPolicy};
use crate::http::handler::{handle, AppState};
use crate::http::request::assign_request_id;
use crate::http::response::ResponseComposer;

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid control header name")]
    HeaderName(#[from] InvalidHeaderName),
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server backed by a reqwest transport with the transparent policy.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let transport = ReqwestTransport::new(TransportPolicy::transparent(), &config.transport)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a server that forwards through `transport`.
    pub fn with_transport(config: ProxyConfig, transport: Arc<dyn Transport>) -> Result<Self, ServerError> {
        let state = AppState {
            composer: Arc::new(ResponseComposer::new(&config.control)?),
            control: Arc::new(config.control.clone()),
            dispatcher: Dispatcher::new(transport),
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        with_middleware(
            Router::new()
                .route("/", any(handle))
                .route("/{*path}", any(handle))
                .with_state(state),
        )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(assign_request_id))
}

/// A panic carries no recognised error, so nothing of it is echoed back.
fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR_BODY).into_response()
}
