//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types deserialize from TOML config files; every field also has an
//! environment override (see `loader`).

use serde::Deserialize;
use std::fmt;

/// Root configuration for the session relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, inbound timeout).
    pub listener: ListenerConfig,

    /// Upstream ChatKit API settings, including the credential.
    pub upstream: UpstreamConfig,

    /// Cross-origin policy for browser callers.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Inbound request timeout in seconds. Validation requires this to stay
    /// above the upstream timeout so a slow upstream surfaces as a structured
    /// transport error, not as the inbound layer cutting the connection.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 45,
        }
    }
}

/// Upstream session-issuance API configuration.
///
/// `api_key` is the only secret in the process. It never leaves this struct
/// except as the outbound Authorization header, and Debug output masks it.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Server-held API credential (env: OPENAI_API_KEY). Mandatory.
    pub api_key: String,

    /// Workflow the issued sessions bind to (env: CHATKIT_WORKFLOW_ID). Mandatory.
    pub workflow_id: String,

    /// Base URL of the session-issuance API.
    pub api_base: String,

    /// Optional project scope, sent as the OpenAI-Project header.
    pub project: Option<String>,

    /// Outbound call timeout in seconds.
    pub timeout_secs: u64,

    /// Requested token lifetime. When unset the field is omitted from the
    /// upstream body entirely; some upstream revisions reject it.
    pub session_ttl_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            workflow_id: String::new(),
            api_base: "https://api.openai.com/v1/chatkit".to_string(),
            project: None,
            timeout_secs: 30,
            session_ttl_secs: None,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"[redacted]")
            .field("workflow_id", &self.workflow_id)
            .field("api_base", &self.api_base)
            .field("project", &self.project)
            .field("timeout_secs", &self.timeout_secs)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

/// Cross-origin policy.
///
/// An empty list (or a literal `*` entry) selects the wildcard policy: any
/// origin, credentials disallowed. A non-empty list selects the allow-list
/// policy: exact-match origins, credentials allowed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins (env: ALLOWED_ORIGINS, comma-separated).
    pub allowed_origins: Vec<String>,

    /// How long browsers may cache preflight responses, in seconds.
    pub max_age_secs: u64,
}

impl CorsConfig {
    /// Whether the wildcard policy is in effect.
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_secs: 3600,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus exporter bind address (env: METRICS_ADDR). Unset disables
    /// the exporter.
    pub metrics_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.api_base, "https://api.openai.com/v1/chatkit");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert!(config.upstream.session_ttl_secs.is_none());
        assert!(config.cors.is_wildcard());
        assert!(config.observability.metrics_address.is_none());
    }

    #[test]
    fn test_inbound_timeout_exceeds_upstream_timeout() {
        let config = RelayConfig::default();
        assert!(config.listener.request_timeout_secs > config.upstream.timeout_secs);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let mut config = RelayConfig::default();
        config.upstream.api_key = "sk-live-abcdef123456".to_string();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-live-abcdef123456"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn test_wildcard_detection() {
        let mut cors = CorsConfig::default();
        assert!(cors.is_wildcard());

        cors.allowed_origins = vec!["https://app.example.com".to_string()];
        assert!(!cors.is_wildcard());

        cors.allowed_origins = vec!["https://app.example.com".to_string(), "*".to_string()];
        assert!(cors.is_wildcard());
    }

    #[test]
    fn test_toml_roundtrip() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            api_key = "sk-test"
            workflow_id = "wf_123"
            session_ttl_secs = 600

            [cors]
            allowed_origins = ["https://chat.example.com"]
        "#;

        let config: RelayConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        // Unspecified fields keep their defaults.
        assert_eq!(config.listener.request_timeout_secs, 45);
        assert_eq!(config.upstream.workflow_id, "wf_123");
        assert_eq!(config.upstream.session_ttl_secs, Some(600));
        assert_eq!(config.cors.allowed_origins, vec!["https://chat.example.com"]);
    }
}
