//! QR code HTTP service library.
//!
//! Accepts text over HTTP and returns a QR code as PNG, SVG, a base64
//! data-URL or terminal art. Symbol construction is delegated to the
//! `qrcode` crate.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod qr;
pub mod resilience;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
