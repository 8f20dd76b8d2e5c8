//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler needs an encode:
//!     → timeouts.rs (move work to the blocking pool, enforce a deadline)
//!     → on timeout or panic: error surfaces as a 500 envelope, never retried
//! ```

pub mod timeouts;

pub use timeouts::{run_blocking, BlockingError};
