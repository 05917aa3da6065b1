//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, including policy names)
//! - Check the listener URI and metrics address
//! - Validate value ranges (weights and confidences in [0, 1], timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::net::ListenerAddress;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = ListenerAddress::parse(&config.listener.server_uri) {
        errors.push(ValidationError::new("listener.server_uri", e.to_string()));
    }

    if config.service.namespace_prefix.trim().is_empty() {
        errors.push(ValidationError::new("service.namespace_prefix", "must not be empty"));
    }

    if config.strategies.lexicon_path.is_none() {
        errors.push(ValidationError::new("strategies.lexicon_path", "is required"));
    }

    for (field, value) in [
        ("strategies.prior_weight", config.strategies.prior_weight),
        ("strategies.unambiguous_prior", config.strategies.unambiguous_prior),
        ("filters.min_confidence", config.filters.min_confidence),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::new(field, format!("{} is outside [0, 1]", value)));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::new("admin.api_key", "must be set when admin is enabled"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
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
    use std::path::PathBuf;

    fn valid() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.strategies.lexicon_path = Some(PathBuf::from("lexicon.tsv"));
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.service.namespace_prefix = " ".into();
        config.strategies.prior_weight = 1.5;
        config.filters.min_confidence = -0.1;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "service.namespace_prefix",
                "strategies.prior_weight",
                "filters.min_confidence",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_admin_needs_key() {
        let mut config = valid();
        config.admin.enabled = true;
        config.admin.api_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
