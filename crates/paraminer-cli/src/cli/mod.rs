//! CLI for ParaMiner.

mod banner;
mod interrupt;
mod run;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use paraminer_core::archive;
use paraminer_core::config::{self, InterruptPolicy, ParaminerConfig};
use std::path::PathBuf;

/// Top-level CLI: mine parameterized URLs for domains from the web archive.
#[derive(Debug, Parser)]
#[command(name = "paraminer", version)]
#[command(about = "ParaMiner: parameterized URLs from web archives", long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["domain", "list"])))]
pub struct Cli {
    /// Domain name to fetch related URLs for.
    #[arg(short, long)]
    pub domain: Option<String>,

    /// File containing a list of domain names, one per line.
    #[arg(short, long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Suppress the banner and per-URL terminal output.
    #[arg(short, long)]
    pub silent: bool,

    /// Proxy address for archive requests (used for HTTP and HTTPS).
    #[arg(long, value_name = "ADDR")]
    pub proxy: Option<String>,

    /// Placeholder for parameter values [default: FUZZ].
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Append every domain's URLs to this file instead of per-domain files.
    #[arg(short, long, value_name = "PATH")]
    pub global_file: Option<PathBuf>,

    /// Directory for per-domain result files [default: results].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Process up to N domains concurrently [default: 1].
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// What Ctrl-C does in a multi-domain run [default: skip-domain].
    #[arg(long, value_enum, value_name = "MODE")]
    pub on_interrupt: Option<InterruptMode>,

    /// Maximum fetch attempts per domain [default: 3].
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between fetch attempts [default: 5].
    #[arg(long, value_name = "SECS")]
    pub retry_delay: Option<f64>,

    /// Read configuration from this file instead of the XDG config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterruptMode {
    /// Give up on the current domain and continue with the next.
    SkipDomain,
    /// Stop the whole run.
    AbortBatch,
}

impl From<InterruptMode> for InterruptPolicy {
    fn from(mode: InterruptMode) -> Self {
        match mode {
            InterruptMode::SkipDomain => InterruptPolicy::SkipDomain,
            InterruptMode::AbortBatch => InterruptPolicy::AbortBatch,
        }
    }
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        cli.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        run::run_mining(&cli, &cfg).await
    }

    /// Applies command-line values on top of the file configuration.
    pub fn apply_overrides(&self, cfg: &mut ParaminerConfig) {
        if let Some(proxy) = &self.proxy {
            cfg.proxy = Some(proxy.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            cfg.placeholder = placeholder.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.results_dir = dir.clone();
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs.max(1);
        }
        if let Some(mode) = self.on_interrupt {
            cfg.on_interrupt = mode.into();
        }
        if self.max_attempts.is_some() || self.retry_delay.is_some() {
            let mut retry = cfg.retry.clone().unwrap_or_default();
            if let Some(n) = self.max_attempts {
                retry.max_attempts = n;
            }
            if let Some(secs) = self.retry_delay {
                retry.delay_secs = secs;
            }
            cfg.retry = Some(retry);
        }
    }

    /// Domains to process: the cleaned `--domain`, or the cleaned contents of `--list`.
    pub fn domains(&self) -> Result<Vec<String>> {
        if let Some(path) = &self.list {
            return archive::read_domain_list(path);
        }
        let raw = self.domain.as_deref().unwrap_or_default();
        let domain = archive::clean_domain(raw)
            .with_context(|| format!("invalid domain {:?}", raw))?;
        Ok(vec![domain])
    }
}

#[cfg(test)]
mod tests;
