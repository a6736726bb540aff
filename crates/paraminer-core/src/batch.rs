//! Per-domain pipeline and the multi-domain runner.
//!
//! A domain goes through fetch, whitespace split, normalization and
//! persistence. The runner keeps up to `jobs` domains in flight (1 means
//! strictly sequential); each pipeline runs on a blocking task because the
//! fetcher uses libcurl synchronously. The result sink sits behind a mutex so
//! writes, and appends to the shared file in particular, never interleave.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::archive::index_query_url;
use crate::cancel::CancelToken;
use crate::config::{InterruptPolicy, ParaminerConfig};
use crate::fetch::{FetchOutcome, FetchRequest, Fetcher};
use crate::output::ResultSink;
use crate::url_model::{split_raw, Normalizer};

/// How one domain ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainStatus {
    /// Normalized URLs were written to `path`.
    Saved { path: PathBuf },
    /// All fetch attempts failed; nothing written.
    FetchFailed,
    /// Interrupted by the user; nothing written.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub status: DomainStatus,
    /// Tokens in the archive response.
    pub raw_count: usize,
    /// URLs left after normalization.
    pub url_count: usize,
}

impl DomainReport {
    fn without_data(domain: &str, status: DomainStatus) -> Self {
        Self {
            domain: domain.to_string(),
            status,
            raw_count: 0,
            url_count: 0,
        }
    }
}

/// Fetch + normalize settings shared by every domain of a run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    fetcher: Fetcher,
    normalizer: Normalizer,
    archive_url: String,
    proxy: Option<String>,
}

impl Pipeline {
    pub fn new(
        fetcher: Fetcher,
        normalizer: Normalizer,
        archive_url: impl Into<String>,
        proxy: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            archive_url: archive_url.into(),
            proxy,
        }
    }

    pub fn from_config(cfg: &ParaminerConfig) -> Self {
        Self::new(
            cfg.fetcher(),
            cfg.normalizer(),
            cfg.archive_url.clone(),
            cfg.proxy.clone(),
        )
    }

    /// Runs one domain end to end. Fetch failure and interrupt are reported
    /// in the returned status; only persistence or request-building errors
    /// come back as `Err`.
    pub fn process_domain(
        &self,
        domain: &str,
        sink: &Mutex<ResultSink>,
        cancel: &CancelToken,
    ) -> Result<DomainReport> {
        tracing::info!("Fetching URLs for {}", domain);
        let url = index_query_url(&self.archive_url, domain);
        let request = FetchRequest::new(&url)
            .with_context(|| format!("invalid index query URL {}", url))?
            .with_proxy(self.proxy.clone());

        let body = match self.fetcher.fetch(&request, cancel) {
            FetchOutcome::Success { body } => body,
            FetchOutcome::Failure { .. } => {
                tracing::error!("Failed to fetch data for domain {}", domain);
                return Ok(DomainReport::without_data(domain, DomainStatus::FetchFailed));
            }
            FetchOutcome::Interrupted => {
                tracing::warn!("Skipping {}: interrupted", domain);
                return Ok(DomainReport::without_data(domain, DomainStatus::Interrupted));
            }
        };

        let raw = split_raw(&body);
        tracing::info!("Found {} URLs for {}", raw.len(), domain);
        let urls = self.normalizer.normalize(&raw);
        tracing::info!("Found {} URLs after cleaning", urls.len());

        let path = {
            let sink = sink
                .lock()
                .map_err(|_| anyhow::anyhow!("result sink lock poisoned"))?;
            sink.write_domain(domain, &urls)?
        };

        Ok(DomainReport {
            domain: domain.to_string(),
            status: DomainStatus::Saved { path },
            raw_count: raw.len(),
            url_count: urls.len(),
        })
    }
}

/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum domains in flight (values below 1 are treated as 1).
    pub jobs: usize,
    pub on_interrupt: InterruptPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            on_interrupt: InterruptPolicy::SkipDomain,
        }
    }
}

/// Totals over a run, plus every domain report in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub reports: Vec<DomainReport>,
    /// True when an interrupt stopped the batch before every domain ran.
    pub aborted: bool,
}

impl BatchSummary {
    pub fn saved(&self) -> usize {
        self.count(|s| matches!(s, DomainStatus::Saved { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| *s == DomainStatus::FetchFailed)
    }

    pub fn interrupted(&self) -> usize {
        self.count(|s| *s == DomainStatus::Interrupted)
    }

    pub fn urls_written(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, DomainStatus::Saved { .. }))
            .map(|r| r.url_count)
            .sum()
    }

    fn count(&self, pred: impl Fn(&DomainStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Processes `domains` with up to `opts.jobs` in flight.
///
/// With `SkipDomain` each domain gets a token scoped at its start, so an
/// interrupt stops the domains in flight at that moment and none started
/// later. With `AbortBatch` every domain shares `cancel`; the first
/// interrupted domain ends spawning and marks the summary aborted.
/// Fetch attempts within one domain stay sequential in either mode.
pub async fn run_batch(
    pipeline: Arc<Pipeline>,
    sink: ResultSink,
    domains: Vec<String>,
    opts: BatchOptions,
    cancel: CancelToken,
) -> Result<BatchSummary> {
    let max_concurrent = opts.jobs.max(1);
    let sink = Arc::new(Mutex::new(sink));
    let mut queue: VecDeque<String> = domains.into();
    let mut summary = BatchSummary::default();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent && !summary.aborted {
            let Some(domain) = queue.pop_front() else {
                break;
            };
            let pipeline = Arc::clone(&pipeline);
            let sink = Arc::clone(&sink);
            let cancel = match opts.on_interrupt {
                InterruptPolicy::SkipDomain => cancel.scoped(),
                InterruptPolicy::AbortBatch => cancel.clone(),
            };
            join_set.spawn_blocking(move || pipeline.process_domain(&domain, &sink, &cancel));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let report = res.map_err(|e| anyhow::anyhow!("domain task join: {}", e))??;

        if report.status == DomainStatus::Interrupted
            && opts.on_interrupt == InterruptPolicy::AbortBatch
        {
            if !summary.aborted {
                tracing::warn!(
                    "Interrupt received; stopping batch ({} domains not started)",
                    queue.len()
                );
            }
            summary.aborted = true;
        }
        summary.reports.push(report);
    }

    tracing::info!(
        "Batch finished: {} saved, {} failed, {} interrupted, {} URLs written",
        summary.saved(),
        summary.failed(),
        summary.interrupted(),
        summary.urls_written()
    );
    Ok(summary)
}
