//! Retry policy for archive fetches.
//!
//! Encapsulates the error taxonomy, error classification (for logging), the
//! fixed-delay attempt policy, and the cancellation-aware retry loop.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryOutcome};
