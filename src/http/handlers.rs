//! Route handlers.

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::{public_base_url, GenerateBody, QrQuery};
use crate::http::response::{image_response, timestamp, HealthStatus, QrData, SuccessEnvelope};
use crate::http::server::AppState;
use crate::qr::{self, download, EncodeRequest, EncodeResult, OutputFormat, QrError, RawParams};

impl AppState {
    fn encode_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeouts.encode_secs)
    }

    fn build(&self, raw: &RawParams, default_format: OutputFormat) -> Result<EncodeRequest, QrError> {
        qr::build_request(raw, &self.config.qr, default_format)
    }

    async fn encode(&self, request: EncodeRequest) -> Result<EncodeResult, QrError> {
        qr::encode(self.encoder.clone(), request, self.encode_timeout()).await
    }
}

fn query_error(rejection: QueryRejection) -> QrError {
    QrError::invalid("query", rejection.body_text())
}

/// `GET /api/v1/generate-qr`
///
/// Without `format` (or with `format=json`/`base64`) the response is a JSON
/// envelope carrying the data-URL and download links. Other formats return
/// the raw image.
pub async fn generate_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<QrQuery>, QueryRejection>,
) -> Result<Response, QrError> {
    let Query(query) = query.map_err(query_error)?;

    let mut raw = query.to_raw();
    if query.wants_envelope() {
        raw.format = None;
    }

    let request = state.build(&raw, OutputFormat::Base64)?;
    tracing::debug!(
        format = %request.output_format,
        width = request.pixel_width,
        chars = request.content.chars().count(),
        "Generating QR code"
    );

    if request.output_format != OutputFormat::Base64 {
        let result = state.encode(request).await?;
        return Ok(image_response(result, query.wants_download()));
    }

    let base = public_base_url(&state.config.server, &headers)?;
    let reference = download::build_download_reference(&base, &request)?;
    let direct = download::direct_download(&reference);

    let result = state.encode(request.clone()).await?;
    let mut data = QrData::new(&request, result);
    data.download_url = Some(reference.to_string());
    data.direct_download = Some(direct.to_string());

    Ok(SuccessEnvelope::new(data).into_response())
}

/// `GET /api/v1/download-qr/{token}`
///
/// Regenerates the PNG described by the token and query; nothing is looked up.
pub async fn download_qr(
    State(state): State<AppState>,
    Path(token): Path<String>,
    query: Result<Query<QrQuery>, QueryRejection>,
) -> Result<Response, QrError> {
    let Query(query) = query.map_err(query_error)?;

    let raw = download::params_from_token(&token, query.to_raw())?;
    let request = state.build(&raw, OutputFormat::Png)?;
    let result = state.encode(request).await?;

    Ok(image_response(result, query.wants_download()))
}

/// `POST /api/v1/generate-qr`
///
/// Always answers with a JSON envelope; `qrCode` holds the data-URL, SVG
/// markup or terminal text depending on the requested format.
pub async fn generate_post(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, QrError> {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Ok(rejection.into_response());
        }
        Err(rejection) => return Err(QrError::invalid("body", rejection.body_text())),
    };

    let raw = RawParams::from(body);
    let request = state.build(&raw, OutputFormat::Base64)?;
    let result = state.encode(request.clone()).await?;

    Ok(SuccessEnvelope::new(QrData::new(&request, result)).into_response())
}

/// `GET /api/v1/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        service: state.config.server.service_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> QrError {
    QrError::NotFound(format!("{} {}", method, uri.path()))
}
