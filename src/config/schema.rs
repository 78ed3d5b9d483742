//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal config works.

use serde::{Deserialize, Serialize};

/// Root configuration for the WAF gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WafConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single protected backend.
    pub backend: BackendConfig,

    /// Detection threshold and logging of verdicts.
    pub detection: DetectionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

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

/// Protected backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend address (e.g., "192.168.1.100:8080").
    pub address: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Detection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Probability at or above which a request is blocked.
    pub threshold: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

/// Timeout configuration for the per-connection pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for the first byte of an inbound request, in milliseconds.
    /// On expiry the connection is dropped without a response; once the
    /// client has sent anything the rest of the head is read unbounded.
    pub initial_read_ms: u64,

    /// Backend connection establishment timeout in milliseconds.
    pub connect_ms: u64,

    /// Relay inactivity timeout in milliseconds; resets whenever the
    /// backend sends bytes.
    pub relay_idle_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            initial_read_ms: 1_000,
            connect_ms: 5_000,
            relay_idle_ms: 5_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_trained_deployment() {
        let config = WafConfig::default();
        assert_eq!(config.detection.threshold, 0.5);
        assert_eq!(config.timeouts.initial_read_ms, 1_000);
        assert_eq!(config.timeouts.relay_idle_ms, 5_000);
    }

    #[test]
    fn minimal_toml_deserializes() {
        let config: WafConfig = toml::from_str(
            r#"
            [backend]
            address = "10.0.0.5:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.address, "10.0.0.5:8080");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
