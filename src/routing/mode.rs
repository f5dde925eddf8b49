//! Invocation mode selection.
//!
//! # Design Decisions
//! - Any reserved-prefix header means header-driven mode, even without a target
//! - A JSON body without control headers means descriptor mode
//! - Everything else falls back to header-driven mode, which rejects it

use axum::http::{header, HeaderMap};

use crate::config::ControlConfig;

/// How one inbound request is to be proxied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Target URL in a control header, request forwarded as-is.
    HeaderDriven,
    /// Body is a JSON request descriptor.
    Descriptor,
}

impl InvocationMode {
    pub fn select(headers: &HeaderMap, control: &ControlConfig) -> Self {
        if headers.keys().any(|name| control.is_reserved(name.as_str())) {
            return InvocationMode::HeaderDriven;
        }
        if is_json(headers) {
            InvocationMode::Descriptor
        } else {
            InvocationMode::HeaderDriven
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationMode::HeaderDriven => "header",
            InvocationMode::Descriptor => "descriptor",
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|media| media.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
