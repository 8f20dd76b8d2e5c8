//! Request parameter extraction.
//!
//! # Responsibilities
//! - Deserialize query strings and JSON bodies into raw, unvalidated values
//! - Normalize both shapes into [`RawParams`] for a single validation path
//! - Derive the public base URL used in download links
//!
//! # Design Decisions
//! - Every value stays a string until validation, so malformed input is
//!   reported with the parameter name instead of a generic decode error
//! - JSON numbers are accepted as numbers or strings

use axum::http::{header, HeaderMap};
use serde::Deserialize;
use url::Url;

use crate::config::ServerConfig;
use crate::qr::{QrError, RawParams};

/// Query string of `GET /api/v1/generate-qr` and `GET /api/v1/download-qr/{token}`.
#[derive(Debug, Default, Deserialize)]
pub struct QrQuery {
    pub text: Option<String>,
    #[serde(alias = "width")]
    pub size: Option<String>,
    pub margin: Option<String>,
    pub dark: Option<String>,
    pub light: Option<String>,
    #[serde(alias = "level", alias = "errorCorrectionLevel")]
    pub ecc: Option<String>,
    pub format: Option<String>,
    pub download: Option<String>,
}

impl QrQuery {
    pub fn wants_download(&self) -> bool {
        self.download
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    /// `format` absent or `json` selects the JSON envelope with links.
    pub fn wants_envelope(&self) -> bool {
        match self.format.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(format) => format.eq_ignore_ascii_case("json"),
        }
    }

    pub fn to_raw(&self) -> RawParams {
        RawParams {
            content: self.text.clone(),
            width: self.size.clone(),
            margin: self.margin.clone(),
            dark: self.dark.clone(),
            light: self.light.clone(),
            ecc: self.ecc.clone(),
            format: self.format.clone(),
        }
    }
}

/// A JSON scalar that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// Body of `POST /api/v1/generate-qr`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    pub text: Option<String>,
    pub url: Option<String>,
    pub config: Option<BodyConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    pub margin: Option<Scalar>,
    pub width: Option<Scalar>,
    pub dark_color: Option<String>,
    pub light_color: Option<String>,
    pub error_correction_level: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub format: Option<String>,
}

impl From<GenerateBody> for RawParams {
    fn from(body: GenerateBody) -> Self {
        let content = body
            .text
            .filter(|t| !t.trim().is_empty())
            .or(body.url);
        let config = body.config.unwrap_or_default();

        RawParams {
            content,
            width: config.width.map(Scalar::into_text),
            margin: config.margin.map(Scalar::into_text),
            dark: config.dark_color,
            light: config.light_color,
            ecc: config.error_correction_level,
            format: config.format.or(config.kind),
        }
    }
}

/// Base URL for self-referencing links.
///
/// Configured public URL first, then the request's Host header, then the
/// bind address. A Host header that is not a bare authority is ignored; only
/// a bad configured URL is an error.
pub fn public_base_url(config: &ServerConfig, headers: &HeaderMap) -> Result<Url, QrError> {
    if let Some(url) = &config.public_url {
        return Url::parse(url)
            .map_err(|e| QrError::EncodingFailed(format!("invalid public URL '{}': {}", url, e)));
    }

    if let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        match host_url(host) {
            Some(url) => return Ok(url),
            None => tracing::debug!(host = %host, "Ignoring unusable Host header for links"),
        }
    }

    let bind = format!("http://{}", config.bind_address());
    Url::parse(&bind).map_err(|e| QrError::EncodingFailed(format!("invalid bind address '{}': {}", bind, e)))
}

fn host_url(host: &str) -> Option<Url> {
    let host = host.trim();
    if host.is_empty() {
        return None;
    }
    Url::parse(&format!("http://{}", host))
        .ok()
        .filter(|url| url.path() == "/" && url.query().is_none() && url.fragment().is_none())
        .filter(|url| url.username().is_empty() && url.password().is_none())
}
