//! Retry loop: run an attempt closure until success, exhaustion, or interrupt.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};
use crate::cancel::CancelToken;

/// How a retry sequence ended.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// An attempt succeeded.
    Done(T),
    /// Every attempt failed; carries the attempt count and the last error.
    Exhausted { attempts: u32, last_error: FetchError },
    /// The cancellation token was set before, during, or between attempts.
    Interrupted,
}

/// Runs `f` (given the 1-based attempt number) until it succeeds or the
/// policy says to stop. Attempts are strictly sequential. The token is
/// checked before each attempt and while waiting between attempts; an
/// attempt that returns `FetchError::Interrupted` also ends the loop.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, cancel: &CancelToken, mut f: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        if cancel.is_cancelled() {
            return RetryOutcome::Interrupted;
        }
        match f(attempt) {
            Ok(v) => return RetryOutcome::Done(v),
            Err(e) if e.is_interrupted() || cancel.is_cancelled() => {
                return RetryOutcome::Interrupted;
            }
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => {
                        tracing::warn!(
                            ?kind,
                            "Attempt {}/{} failed: {}",
                            attempt,
                            policy.max_attempts,
                            e
                        );
                        return RetryOutcome::Exhausted {
                            attempts: attempt,
                            last_error: e,
                        };
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(
                            ?kind,
                            "Attempt {}/{} failed: {}. Retrying in {:.0?}...",
                            attempt,
                            policy.max_attempts,
                            e,
                            d
                        );
                        if cancel.sleep(d).is_err() {
                            return RetryOutcome::Interrupted;
                        }
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn always_failing_makes_exactly_max_attempts() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let out: RetryOutcome<()> = run_with_retry(&fast_policy(3), &cancel, |_| {
            calls += 1;
            Err(FetchError::HttpStatus(500))
        });
        assert_eq!(calls, 3);
        match out {
            RetryOutcome::Exhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(matches!(last_error, FetchError::HttpStatus(500)));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[test]
    fn success_stops_retrying() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let out = run_with_retry(&fast_policy(5), &cancel, |attempt| {
            calls += 1;
            if attempt < 2 {
                Err(FetchError::HttpStatus(503))
            } else {
                Ok("body")
            }
        });
        assert_eq!(calls, 2);
        assert!(matches!(out, RetryOutcome::Done("body")));
    }

    #[test]
    fn interrupted_attempt_short_circuits() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let out: RetryOutcome<()> = run_with_retry(&fast_policy(3), &cancel, |_| {
            calls += 1;
            Err(FetchError::Interrupted)
        });
        assert_eq!(calls, 1);
        assert!(matches!(out, RetryOutcome::Interrupted));
    }

    #[test]
    fn cancel_during_attempt_stops_remaining_attempts() {
        let cancel = CancelToken::new();
        let inner = cancel.clone();
        let mut calls = 0;
        let out: RetryOutcome<()> = run_with_retry(&fast_policy(3), &cancel, |_| {
            calls += 1;
            inner.cancel();
            Err(FetchError::HttpStatus(500))
        });
        assert_eq!(calls, 1);
        assert!(matches!(out, RetryOutcome::Interrupted));
    }

    #[test]
    fn cancel_during_wait_stops_remaining_attempts() {
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let policy = RetryPolicy::new(3, Duration::from_secs(30));
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            remote.cancel();
        });
        let mut calls = 0;
        let out: RetryOutcome<()> = run_with_retry(&policy, &cancel, |_| {
            calls += 1;
            Err(FetchError::HttpStatus(502))
        });
        handle.join().unwrap();
        assert_eq!(calls, 1);
        assert!(matches!(out, RetryOutcome::Interrupted));
    }

    #[test]
    fn pre_cancelled_token_makes_no_attempt() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut calls = 0;
        let out: RetryOutcome<()> = run_with_retry(&fast_policy(3), &cancel, |_| {
            calls += 1;
            Ok(())
        });
        assert_eq!(calls, 0);
        assert!(matches!(out, RetryOutcome::Interrupted));
    }
}
