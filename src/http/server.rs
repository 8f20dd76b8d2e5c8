//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::ServiceConfig;
use crate::http::handlers::{download_qr, generate_get, generate_post, health, not_found};
use crate::http::middleware::track_metrics;
use crate::http::X_REQUEST_ID;
use crate::lifecycle::shutdown;
use crate::qr::{Encoder, QrCodeEncoder};

/// Application state injected into handlers.
///
/// Read-only and shared; no request mutates it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub encoder: Arc<dyn Encoder>,
}

/// HTTP server for the QR service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a server backed by the `qrcode` encoder.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_encoder(config, Arc::new(QrCodeEncoder))
    }

    /// Create a server with a specific encoder implementation.
    pub fn with_encoder(config: ServiceConfig, encoder: Arc<dyn Encoder>) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            encoder,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unknown paths and known paths with the wrong method both answer with
    /// the 404 envelope.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/v1/generate-qr", get(generate_get).post(generate_post))
            .route("/api/v1/download-qr/{token}", get(download_qr))
            .route("/api/v1/health", get(health))
            .route_layer(middleware::from_fn(track_metrics))
            .fallback(not_found)
            .method_not_allowed_fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        Duration::from_secs(config.timeouts.request_secs),
                    )),
            )
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            encode_timeout_secs = self.config.timeouts.encode_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
