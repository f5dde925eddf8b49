//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and header names
//! - Check the target header is itself covered by the reserved prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a valid header name")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("control.prefix must be non-empty and lower-case")]
    InvalidPrefix,

    #[error("control.target_header '{header}' must start with the reserved prefix '{prefix}'")]
    TargetOutsidePrefix { header: String, prefix: String },

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }

    let control = &config.control;
    if control.prefix.is_empty() || control.prefix != control.prefix.to_ascii_lowercase() {
        errors.push(ValidationError::InvalidPrefix);
    }
    check_header(&mut errors, "control.target_header", &control.target_header);
    check_header(&mut errors, "control.debug_header", &control.debug_header);
    check_header(&mut errors, "control.content_type_header", &control.content_type_header);

    if !control.prefix.is_empty() && !control.is_reserved(&control.target_header) {
        errors.push(ValidationError::TargetOutsidePrefix {
            header: control.target_header.clone(),
            prefix: control.prefix.clone(),
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_header(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if HeaderName::from_bytes(value.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName {
            field,
            value: value.to_string(),
        });
    }
}
