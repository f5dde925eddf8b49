//! Single-hop HTTP forwarding proxy library.

pub mod config;
pub mod error;
pub mod forward;
pub mod headers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
