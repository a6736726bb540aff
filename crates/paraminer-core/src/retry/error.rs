//! Fetch error type used for retry decisions.

use thiserror::Error;

/// Error returned by a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported a transport error (DNS, connect, timeout, proxy, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    HttpStatus(u32),
    /// The transfer was aborted because the cancellation token was set.
    #[error("interrupted by user")]
    Interrupted,
}

impl FetchError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, FetchError::Interrupted)
    }
}
