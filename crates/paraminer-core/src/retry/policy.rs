use std::time::Duration;

/// High-level classification of a failed attempt.
///
/// Every kind is retried; the kind is reported in logs so a user can tell a
/// throttling archive from a dead proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// Network-level failure (DNS, refused connection, reset).
    Connection,
    /// Proxy could not be resolved or reached.
    Proxy,
    /// Any other non-2xx status.
    HttpStatus(u16),
    /// Anything else.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Attempt budget exhausted.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay retry policy with an attempt bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Wait between two attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Decide what happens after attempt number `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_attempts_five_seconds() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.delay, Duration::from_secs(5));
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::from_secs(5)));
        assert_eq!(p.decide(2), RetryDecision::RetryAfter(Duration::from_secs(5)));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn delay_is_fixed() {
        let p = RetryPolicy::new(10, Duration::from_millis(250));
        assert_eq!(p.decide(1), p.decide(8));
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let p = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.decide(1), RetryDecision::NoRetry);
    }
}
