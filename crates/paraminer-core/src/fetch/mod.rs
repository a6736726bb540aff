//! Resilient archive fetcher.
//!
//! Issues an HTTP GET through libcurl (via the `curl` crate), drawing a fresh
//! random user-agent for every attempt and routing through an optional proxy.
//! Failed attempts (transport error or non-2xx) are retried with a fixed delay
//! up to the policy bound. A set [`CancelToken`] ends the sequence with
//! [`FetchOutcome::Interrupted`], which is distinct from exhaustion.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

mod get;

use std::time::Duration;

use crate::cancel::CancelToken;
use crate::retry::{run_with_retry, FetchError, RetryOutcome, RetryPolicy};
use crate::user_agent::UserAgentPool;

/// Target of a single fetch: the absolute URL and an optional proxy address
/// applied to both HTTP and HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    proxy: Option<String>,
}

impl FetchRequest {
    /// Validates that `url` is an absolute URL.
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        let parsed = url::Url::parse(url)?;
        Ok(Self {
            url: parsed.to_string(),
            proxy: None,
        })
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }
}

/// Result of one attempt sequence.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A 2xx response; body decoded as UTF-8 (lossy).
    Success { body: String },
    /// Every attempt failed.
    Failure { reason: FetchError, attempts: u32 },
    /// Stopped by the cancellation token.
    Interrupted,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// Body of a successful fetch; `None` for failure and interrupt alike.
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchOutcome::Success { body } => Some(body),
            FetchOutcome::Failure { .. } | FetchOutcome::Interrupted => None,
        }
    }
}

/// libcurl timeouts for a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Hard wall-clock limit for one attempt.
    pub timeout: Duration,
    /// Abort when fewer than this many bytes/s arrive for `low_speed_time`.
    /// 0 (the default) disables the check.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
            low_speed_limit: 0,
            low_speed_time: Duration::from_secs(60),
        }
    }
}

/// Fetcher with its retry policy, user-agent pool and timeouts. Holds no
/// per-call state; one instance can serve many domains.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    policy: RetryPolicy,
    user_agents: UserAgentPool,
    http: HttpOptions,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy, user_agents: UserAgentPool, http: HttpOptions) -> Self {
        Self {
            policy,
            user_agents,
            http,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `request`, retrying on failure. See the module docs.
    pub fn fetch(&self, request: &FetchRequest, cancel: &CancelToken) -> FetchOutcome {
        self.fetch_with(request, cancel, |user_agent| {
            get::get_once(request, user_agent, &self.http, cancel)
        })
    }

    /// Retry driver with a pluggable attempt function (given the user-agent
    /// drawn for that attempt).
    pub(crate) fn fetch_with<F>(
        &self,
        request: &FetchRequest,
        cancel: &CancelToken,
        mut attempt_fn: F,
    ) -> FetchOutcome
    where
        F: FnMut(&str) -> Result<String, FetchError>,
    {
        let outcome = run_with_retry(&self.policy, cancel, |attempt| {
            let user_agent = self.user_agents.pick();
            tracing::debug!(
                attempt,
                user_agent,
                proxy = request.proxy().unwrap_or("-"),
                "GET {}",
                request.url()
            );
            attempt_fn(user_agent)
        });

        match outcome {
            RetryOutcome::Done(body) => FetchOutcome::Success { body },
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                tracing::error!(
                    "Failed to fetch {} after {} attempts: {}",
                    request.url(),
                    attempts,
                    last_error
                );
                FetchOutcome::Failure {
                    reason: last_error,
                    attempts,
                }
            }
            RetryOutcome::Interrupted => {
                tracing::warn!("Interrupted while fetching {}", request.url());
                FetchOutcome::Interrupted
            }
        }
    }
}
