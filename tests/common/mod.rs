//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use qr_service::config::ServiceConfig;
use qr_service::qr::{EncodeRequest, EncodeResult, Encoder, QrError};
use qr_service::{HttpServer, Shutdown};
use tower::ServiceExt;

/// Collected response parts.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Router with the production encoder and default config.
#[allow(dead_code)]
pub fn router() -> Router {
    HttpServer::new(ServiceConfig::default()).router()
}

/// Router with a custom encoder.
#[allow(dead_code)]
pub fn router_with(encoder: Arc<dyn Encoder>) -> Router {
    HttpServer::with_encoder(ServiceConfig::default(), encoder).router()
}

/// Send one request through the router without a socket.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body readable");
    TestResponse { status, headers, body }
}

#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .header("host", "qr.test")
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

#[allow(dead_code)]
pub async fn post_json(router: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// Encoder that always fails, to exercise the 500 path.
#[allow(dead_code)]
pub struct FailingEncoder;

impl Encoder for FailingEncoder {
    fn encode(&self, _request: &EncodeRequest) -> Result<EncodeResult, QrError> {
        Err(QrError::EncodingFailed("encoder unavailable".into()))
    }
}

/// Encoder that sleeps longer than any test timeout.
#[allow(dead_code)]
pub struct StallingEncoder(pub Duration);

impl Encoder for StallingEncoder {
    fn encode(&self, _request: &EncodeRequest) -> Result<EncodeResult, QrError> {
        std::thread::sleep(self.0);
        Ok(EncodeResult::Terminal(String::new()))
    }
}

/// Start a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
