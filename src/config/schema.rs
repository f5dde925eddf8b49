//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Reserved control headers.
    pub control: ControlConfig,

    /// Outbound client settings.
    pub transport: TransportConfig,

    /// Inbound request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Names of the proxy-internal headers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Reserved prefix. Inbound headers carrying it never reach the origin.
    pub prefix: String,

    /// Inbound header holding the absolute target URL.
    pub target_header: String,

    /// Response header carrying percent-encoded debug metadata (header-driven mode).
    pub debug_header: String,

    /// Response header carrying the origin content type (descriptor mode).
    pub content_type_header: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            prefix: "x-sfetch-".to_string(),
            target_header: "x-sfetch-url".to_string(),
            debug_header: "x-sfetch-extras".to_string(),
            content_type_header: "x-sfetch-content-type".to_string(),
        }
    }
}

impl ControlConfig {
    /// True if `name` carries the reserved prefix (case-insensitive).
    pub fn is_reserved(&self, name: &str) -> bool {
        name.len() >= self.prefix.len()
            && name.as_bytes()[..self.prefix.len()].eq_ignore_ascii_case(self.prefix.as_bytes())
    }
}

/// Outbound client settings.
///
/// There is deliberately no timeout field: this layer enforces no deadline.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransportConfig {
    /// User-Agent sent when the forwarded request carries none.
    pub user_agent: Option<String>,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log format.
    pub log_format: LogFormat,

    /// Default `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus exporter address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "sfetch_proxy=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.control.target_header, "x-sfetch-url");
        assert!(config.transport.user_agent.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [control]
            prefix = "x-relay-"
            target_header = "x-relay-target"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.control.prefix, "x-relay-");
        assert_eq!(config.control.debug_header, "x-sfetch-extras");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_reserved_prefix_is_case_insensitive() {
        let control = ControlConfig::default();
        assert!(control.is_reserved("X-SFetch-Debug"));
        assert!(control.is_reserved("x-sfetch-url"));
        assert!(!control.is_reserved("x-sfetc"));
        assert!(!control.is_reserved("accept"));
    }
}
