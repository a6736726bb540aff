//! One mining run: banner, input, clean slate, batch, summary.

use anyhow::Result;
use paraminer_core::batch::{self, BatchOptions, Pipeline};
use paraminer_core::cancel::CancelToken;
use paraminer_core::config::ParaminerConfig;
use paraminer_core::output::{self, ResultSink};
use std::sync::Arc;

use super::{banner, interrupt, Cli};

pub async fn run_mining(cli: &Cli, cfg: &ParaminerConfig) -> Result<()> {
    if !cli.silent {
        banner::print_banner();
    }

    let domains = cli.domains()?;
    if domains.is_empty() {
        tracing::warn!("no domains to process");
        return Ok(());
    }

    output::clean_slate(cli.global_file.as_deref(), &cfg.results_dir)?;

    let sink = match &cli.global_file {
        Some(path) => ResultSink::shared(path),
        None => ResultSink::per_domain(&cfg.results_dir, !cli.silent),
    };

    let cancel = CancelToken::new();
    let listener = interrupt::spawn_listener(cancel.clone());

    let pipeline = Arc::new(Pipeline::from_config(cfg));
    let opts = BatchOptions {
        jobs: cfg.jobs,
        on_interrupt: cfg.on_interrupt,
    };
    tracing::debug!(domains = domains.len(), jobs = opts.jobs, "starting batch");
    let summary = batch::run_batch(pipeline, sink, domains, opts, cancel).await;
    listener.abort();
    let summary = summary?;

    if summary.aborted {
        tracing::warn!("run aborted by user");
    }
    if summary.failed() > 0 {
        tracing::warn!("{} domain(s) could not be fetched", summary.failed());
    }
    Ok(())
}
