//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the QR service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener and public URL settings.
    pub server: ServerConfig,

    /// Input limits and encoding defaults.
    pub qr: QrConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port.
    pub port: u16,

    /// Base URL used in download links; derived from the Host header when unset.
    pub public_url: Option<String>,

    /// Name reported by the health endpoint.
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url: None,
            service_name: "QR Code API".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Input limits and defaults applied to every encode request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QrConfig {
    /// Maximum content length in characters.
    pub max_content_chars: usize,

    /// Smallest accepted image width in pixels.
    pub min_width: u32,

    /// Largest accepted image width in pixels.
    pub max_width: u32,

    /// Width used when the request names none.
    pub default_width: u32,

    /// Largest accepted margin in modules.
    pub max_margin: u32,

    /// Margin used when the request names none.
    pub default_margin: u32,

    /// Error correction level used when the request names none (L, M, Q, H).
    pub default_error_correction: String,

    /// Default dark module color (hex).
    pub default_dark: String,

    /// Default light module color (hex).
    pub default_light: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 4096,
            min_width: 16,
            max_width: 4096,
            default_width: 300,
            max_margin: 64,
            default_margin: 4,
            default_error_correction: "M".to_string(),
            default_dark: "000000".to_string(),
            default_light: "FFFFFF".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Deadline for a single encoder call in seconds.
    pub encode_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            encode_secs: 10,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive, overridden by `RUST_LOG`.
    pub log_level: String,

    /// Text or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: crate::observability::logging::DEFAULT_FILTER.to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
