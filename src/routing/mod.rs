//! Request classification and target resolution.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → mode.rs (header-driven or descriptor)
//!     → resolver.rs (target URL, cleaned headers / validated descriptor)
//!     → forward::Dispatcher
//! ```

pub mod mode;
pub mod resolver;

pub use mode::InvocationMode;
pub use resolver::{resolve_descriptor, resolve_header_target, HeaderTarget};
