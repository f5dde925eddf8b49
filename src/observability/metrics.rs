//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sfetch_requests_total` (counter): requests by mode and status
//! - `sfetch_request_duration_seconds` (histogram): latency by mode
//! - `sfetch_transport_errors_total` (counter): failed origin calls by mode
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(mode: &'static str, status: u16, start: Instant) {
    metrics::counter!("sfetch_requests_total", "mode" => mode, "status" => status.to_string()).increment(1);
    metrics::histogram!("sfetch_request_duration_seconds", "mode" => mode).record(start.elapsed().as_secs_f64());
}

pub fn record_transport_error(mode: &'static str) {
    metrics::counter!("sfetch_transport_errors_total", "mode" => mode).increment(1);
}
