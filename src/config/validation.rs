//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. Every problem is reported,
//! not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::qr::{EcLevel, HexColor};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a configuration: ServiceConfig → Result<(), Vec<ValidationError>>.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let qr = &config.qr;

    if qr.max_content_chars == 0 {
        errors.push(ValidationError::new("qr.max_content_chars", "must be greater than 0"));
    }
    if qr.min_width == 0 {
        errors.push(ValidationError::new("qr.min_width", "must be greater than 0"));
    }
    if qr.min_width > qr.max_width {
        errors.push(ValidationError::new(
            "qr.max_width",
            format!("{} is smaller than min_width {}", qr.max_width, qr.min_width),
        ));
    }
    if qr.default_width < qr.min_width || qr.default_width > qr.max_width {
        errors.push(ValidationError::new(
            "qr.default_width",
            format!("{} is outside [{}, {}]", qr.default_width, qr.min_width, qr.max_width),
        ));
    }
    if qr.default_margin > qr.max_margin {
        errors.push(ValidationError::new(
            "qr.default_margin",
            format!("{} exceeds max_margin {}", qr.default_margin, qr.max_margin),
        ));
    }
    if qr.default_error_correction.parse::<EcLevel>().is_err() {
        errors.push(ValidationError::new(
            "qr.default_error_correction",
            format!("'{}' is not one of L, M, Q, H", qr.default_error_correction),
        ));
    }
    for (field, value) in [("qr.default_dark", &qr.default_dark), ("qr.default_light", &qr.default_light)] {
        if let Err(reason) = value.parse::<HexColor>() {
            errors.push(ValidationError::new(field, reason));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.encode_secs == 0 {
        errors.push(ValidationError::new("timeouts.encode_secs", "must be greater than 0"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be greater than 0"));
    }

    if let Some(public_url) = &config.server.public_url {
        match url::Url::parse(public_url) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => errors.push(ValidationError::new(
                "server.public_url",
                format!("'{}' is not an absolute URL", public_url),
            )),
        }
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ServiceConfig::default();
        config.qr.min_width = 500;
        config.qr.max_width = 100;
        config.qr.default_error_correction = "Z".into();
        config.qr.default_dark = "nope".into();
        config.timeouts.encode_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"qr.max_width"));
        assert!(fields.contains(&"qr.default_width"));
        assert!(fields.contains(&"qr.default_error_correction"));
        assert!(fields.contains(&"qr.default_dark"));
        assert!(fields.contains(&"timeouts.encode_secs"));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "not-an-addr".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_public_url_must_be_absolute() {
        let mut config = ServiceConfig::default();
        config.server.public_url = Some("/relative".into());
        assert!(validate_config(&config).is_err());

        config.server.public_url = Some("mailto:qr@example.com".into());
        assert!(validate_config(&config).is_err());

        config.server.public_url = Some("https://qr.example.com/qr".into());
        assert!(validate_config(&config).is_ok());
    }
}
