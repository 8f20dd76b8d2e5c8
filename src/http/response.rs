//! Response shaping.
//!
//! # Responsibilities
//! - Success envelope `{success, data}` for JSON output
//! - Error envelope `{success:false, error, message, code}` with status mapping
//! - Raw image bodies with content type and optional attachment disposition

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::qr::{EcLevel, EncodeRequest, EncodeResult, HexColor, QrError};

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

impl<T: Serialize> IntoResponse for SuccessEnvelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Options the image was generated with, echoed back to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEcho {
    pub width: u32,
    pub margin: u32,
    pub dark_color: HexColor,
    pub light_color: HexColor,
    pub error_correction_level: EcLevel,
}

impl From<&EncodeRequest> for ConfigEcho {
    fn from(request: &EncodeRequest) -> Self {
        Self {
            width: request.pixel_width,
            margin: request.margin,
            dark_color: request.dark_color,
            light_color: request.light_color,
            error_correction_level: request.error_correction,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrData {
    pub content: String,
    pub format: &'static str,
    pub timestamp: String,
    pub qr_code: String,
    pub config: ConfigEcho,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_download: Option<String>,
}

impl QrData {
    pub fn new(request: &EncodeRequest, result: EncodeResult) -> Self {
        Self {
            content: request.content.clone(),
            format: result.format().as_str(),
            timestamp: timestamp(),
            qr_code: result.into_text(),
            config: ConfigEcho::from(request),
            download_url: None,
            direct_download: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub code: &'static str,
}

impl From<&QrError> for ErrorEnvelope {
    fn from(err: &QrError) -> Self {
        Self {
            success: false,
            error: err.headline(),
            message: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for QrError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "Request rejected");
        }
        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
    pub timestamp: String,
}

/// Raw body for png/svg/terminal output.
///
/// With `download` set, the body is served as an attachment named
/// `qrcode-<unix millis>.<ext>`.
pub fn image_response(result: EncodeResult, download: bool) -> Response {
    let content_type = result.content_type();
    let extension = result.extension();
    let mut response = result.into_bytes().into_response();

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if download {
        let disposition = format!(
            "attachment; filename=\"qrcode-{}.{}\"",
            Utc::now().timestamp_millis(),
            extension
        );
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }

    response
}
