//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler, dispatcher, server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every request-scoped event
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
