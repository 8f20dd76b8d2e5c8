//! Timeout enforcement for blocking work.
//!
//! CPU-bound calls run on Tokio's blocking pool so they never stall the
//! reactor; the caller awaits them under a deadline. On timeout the caller
//! stops waiting; the blocking task runs to completion and its output is
//! dropped.

use std::time::Duration;

use thiserror::Error;

/// Failure modes of [`run_blocking`].
#[derive(Debug, Error)]
pub enum BlockingError {
    /// The deadline elapsed before the task finished.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The task panicked or was cancelled by the runtime.
    #[error("worker failed: {0}")]
    Join(String),
}

/// Run `f` on the blocking pool and wait at most `limit` for its result.
pub async fn run_blocking<T, F>(limit: Duration, f: F) -> Result<T, BlockingError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(f);
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_err)) => Err(BlockingError::Join(join_err.to_string())),
        Err(_) => Err(BlockingError::TimedOut(limit)),
    }
}
