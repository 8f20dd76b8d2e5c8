//! Metrics collection and exposition.
//!
//! # Metrics
//! - `qr_requests_total` (counter): requests by route, method, status
//! - `qr_request_duration_seconds` (histogram): handler latency by route
//! - `qr_encode_total` (counter): encoder calls by format and outcome
//! - `qr_encode_duration_seconds` (histogram): encoder latency by format
//!
//! Recording is a no-op until [`init_metrics`] installs a recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: String, status: u16, start: Instant) {
    histogram!("qr_request_duration_seconds", "route" => route.clone()).record(start.elapsed().as_secs_f64());
    counter!(
        "qr_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_encode(format: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("qr_encode_total", "format" => format, "outcome" => outcome).increment(1);
    histogram!("qr_encode_duration_seconds", "format" => format).record(start.elapsed().as_secs_f64());
}
