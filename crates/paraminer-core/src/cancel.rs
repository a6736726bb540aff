//! Interrupt handling: a shared cancellation token.
//!
//! The CLI cancels the token from its Ctrl-C listener; the fetcher checks it
//! before each attempt, from the libcurl progress callback during a transfer,
//! and while waiting between attempts. A [`CancelToken::scoped`] token only
//! sees interrupts issued after it was created, which lets one Ctrl-C stop the
//! domains in flight without touching the ones started later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Granularity of interruptible sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Error returned when work is stopped by a user interrupt.
#[derive(Debug)]
pub struct Interrupted;

impl std::fmt::Display for Interrupted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interrupted by user")
    }
}

impl std::error::Error for Interrupted {}

/// Cloneable interrupt flag. Clones and scoped tokens share the interrupt count.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    /// Interrupts issued so far.
    issued: Arc<AtomicU64>,
    /// Interrupts issued before this token was scoped.
    baseline: u64,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the work holding this token or any token
    /// sharing its count.
    pub fn cancel(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.issued.load(Ordering::SeqCst) > self.baseline
    }

    /// A token that ignores interrupts issued before this call but sees every
    /// later one.
    pub fn scoped(&self) -> CancelToken {
        CancelToken {
            issued: Arc::clone(&self.issued),
            baseline: self.issued.load(Ordering::SeqCst),
        }
    }

    /// Sleeps for `duration`, waking early if the token is cancelled.
    /// Returns `Err(Interrupted)` when the sleep was cut short.
    pub fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return Err(Interrupted);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }
}
