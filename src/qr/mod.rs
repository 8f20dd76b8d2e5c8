//! QR request handling core.
//!
//! # Data Flow
//! ```text
//! RawParams (query string / JSON body)
//!     → validate.rs (content checks, numeric/color/level/format parsing)
//!     → EncodeRequest (validated, request scoped)
//!     → encoder.rs (Encoder trait; qrcode + image backed)
//!     → EncodeResult (png bytes / svg / data-url / terminal text)
//!
//! download.rs turns an EncodeRequest into a URL that regenerates it.
//! ```

pub mod download;
pub mod encoder;
pub mod error;
pub mod types;
pub mod validate;

pub use encoder::{Encoder, QrCodeEncoder};
pub use error::QrError;
pub use types::{EcLevel, EncodeRequest, EncodeResult, HexColor, OutputFormat, RawParams};
pub use validate::{build_request, validate};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::observability::metrics;
use crate::resilience::{run_blocking, BlockingError};

/// Run `encoder` on the blocking pool, bounded by `limit`.
///
/// Failures are reported as [`QrError::EncodingFailed`] and never retried.
pub async fn encode(
    encoder: Arc<dyn Encoder>,
    request: EncodeRequest,
    limit: Duration,
) -> Result<EncodeResult, QrError> {
    let start = Instant::now();
    let format = request.output_format;

    let result = match run_blocking(limit, move || encoder.encode(&request)).await {
        Ok(result) => result,
        Err(BlockingError::TimedOut(limit)) => Err(QrError::EncodingFailed(format!(
            "encoding timed out after {}s",
            limit.as_secs_f64()
        ))),
        Err(BlockingError::Join(reason)) => Err(QrError::EncodingFailed(reason)),
    };

    metrics::record_encode(format.as_str(), result.is_ok(), start);
    result
}
