//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// An environment override whose value could not be used.
///
/// Config is loaded before logging is up, so these are handed back to the
/// caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
}

/// Load configuration: optional TOML file, then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<(ServiceConfig, Vec<RejectedOverride>), ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    let rejected = apply_env_overrides(&mut config, |key| env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, rejected))
}

/// Parse a TOML document; missing fields take their defaults.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply `PORT`, `HOST`, `QR_PUBLIC_URL` and `QR_LOG_FORMAT`.
///
/// `lookup` abstracts the environment so overrides can be tested without
/// mutating process state. Unusable values leave the setting unchanged and
/// are returned.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Vec<RejectedOverride>
where
    F: Fn(&str) -> Option<String>,
{
    let mut rejected = Vec::new();

    if let Some(port) = lookup("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => rejected.push(RejectedOverride { key: "PORT", value: port }),
        }
    }

    if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
        config.server.host = host.trim().to_string();
    }

    if let Some(url) = lookup("QR_PUBLIC_URL").filter(|u| !u.trim().is_empty()) {
        config.server.public_url = Some(url.trim().to_string());
    }

    if let Some(format) = lookup("QR_LOG_FORMAT") {
        match format.to_lowercase().as_str() {
            "json" => config.observability.log_format = LogFormat::Json,
            "text" | "plain" => config.observability.log_format = LogFormat::Text,
            _ => rejected.push(RejectedOverride {
                key: "QR_LOG_FORMAT",
                value: format,
            }),
        }
    }

    rejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let (config, _) = load_config(None).unwrap();
        assert_eq!(config.qr.max_content_chars, 4096);
        assert_eq!(config.timeouts.encode_secs, 10);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = parse_config(
            r#"
            [server]
            port = 8088
            public_url = "https://qr.example.com"

            [qr]
            default_error_correction = "H"
            max_width = 2048
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.public_url.as_deref(), Some("https://qr.example.com"));
        assert_eq!(config.qr.default_error_correction, "H");
        assert_eq!(config.qr.max_width, 2048);
        assert_eq!(config.qr.default_width, 300);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_config("[server\nport = 1"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        let rejected = apply_env_overrides(
            &mut config,
            env_from(&[
                ("PORT", "4000"),
                ("HOST", "127.0.0.1"),
                ("QR_PUBLIC_URL", "https://qr.example.com"),
                ("QR_LOG_FORMAT", "json"),
            ]),
        );
        assert_eq!(config.server.bind_address(), "127.0.0.1:4000");
        assert_eq!(config.server.public_url.as_deref(), Some("https://qr.example.com"));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_invalid_overrides_are_reported() {
        let mut config = ServiceConfig::default();
        let rejected = apply_env_overrides(
            &mut config,
            env_from(&[("PORT", "eighty"), ("QR_LOG_FORMAT", "xml")]),
        );
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.observability.log_format, LogFormat::Text);
        assert_eq!(
            rejected,
            vec![
                RejectedOverride {
                    key: "PORT",
                    value: "eighty".into()
                },
                RejectedOverride {
                    key: "QR_LOG_FORMAT",
                    value: "xml".into()
                },
            ]
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "a",
                reason: "bad".into(),
            },
            ValidationError {
                field: "b",
                reason: "worse".into(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: a: bad, b: worse");
    }
}
