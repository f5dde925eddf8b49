//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned)
//!     → handler.rs (mode selection, resolve, dispatch)
//!     → response.rs (copy origin response, add diagnostics)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{handle, AppState};
pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::{DebugMetadata, ResponseComposer};
pub use server::{HttpServer, ServerError};
