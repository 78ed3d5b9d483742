//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold in [0,1], timeouts > 0)
//! - Check addresses parse as socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: WafConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::WafConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid listener bind address {0:?}")]
    InvalidBindAddress(String),
    #[error("invalid backend address {0:?}")]
    InvalidBackendAddress(String),
    #[error("detection threshold {0} outside [0, 1]")]
    ThresholdOutOfRange(f32),
    #[error("timeout {name} must be greater than zero")]
    ZeroTimeout { name: &'static str },
    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &WafConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.backend.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBackendAddress(
            config.backend.address.clone(),
        ));
    }
    if !(0.0..=1.0).contains(&config.detection.threshold) {
        errors.push(ValidationError::ThresholdOutOfRange(
            config.detection.threshold,
        ));
    }
    for (name, value) in [
        ("initial_read_ms", config.timeouts.initial_read_ms),
        ("connect_ms", config.timeouts.connect_ms),
        ("relay_idle_ms", config.timeouts.relay_idle_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { name });
        }
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&WafConfig::default()).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = WafConfig::default();
        config.backend.address = "not-an-address".into();
        config.detection.threshold = 1.5;
        config.timeouts.relay_idle_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ThresholdOutOfRange(_))));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = WafConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
