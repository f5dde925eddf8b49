//! Outbound forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardRequest
//!     → dispatcher.rs (logging, header form of the reply)
//!     → transport.rs (reqwest, no redirects, every status accepted)
//!     → ResponseDescriptor
//! ```

pub mod dispatcher;
pub mod transport;
pub mod types;

pub use dispatcher::Dispatcher;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportPolicy};
pub use types::{ForwardRequest, RequestDescriptor, ResponseDescriptor};
