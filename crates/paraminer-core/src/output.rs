//! Result persistence.
//!
//! Two modes: every domain appended to one shared accumulation file, or one
//! freshly created `<domain>.txt` per domain inside a results directory
//! (optionally echoing each URL to stdout). [`clean_slate`] resets both
//! locations at startup.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::url_model::{result_filename, NormalizedUrlSet};

/// Default results directory (relative to the working directory).
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Where normalized URLs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSink {
    /// Append every domain's URLs to one file.
    Shared { path: PathBuf },
    /// One file per domain in `dir`; `echo` prints each URL to stdout as well.
    PerDomain { dir: PathBuf, echo: bool },
}

impl ResultSink {
    pub fn shared(path: impl Into<PathBuf>) -> Self {
        ResultSink::Shared { path: path.into() }
    }

    pub fn per_domain(dir: impl Into<PathBuf>, echo: bool) -> Self {
        ResultSink::PerDomain {
            dir: dir.into(),
            echo,
        }
    }

    /// Persists `urls` for `domain`; returns the file written to.
    pub fn write_domain(&self, domain: &str, urls: &NormalizedUrlSet) -> Result<PathBuf> {
        match self {
            ResultSink::Shared { path } => {
                let file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("open shared file {}", path.display()))?;
                write_lines(file, urls, None::<io::Sink>)
                    .with_context(|| format!("append to {}", path.display()))?;
                tracing::info!("Appended {} URLs for {} to {}", urls.len(), domain, path.display());
                Ok(path.clone())
            }
            ResultSink::PerDomain { dir, echo } => {
                fs::create_dir_all(dir)
                    .with_context(|| format!("create results dir {}", dir.display()))?;
                let path = dir.join(result_filename(domain));
                let file = fs::File::create(&path)
                    .with_context(|| format!("create result file {}", path.display()))?;
                let stdout = io::stdout();
                let echo_to = if *echo { Some(stdout.lock()) } else { None };
                write_lines(file, urls, echo_to)
                    .with_context(|| format!("write {}", path.display()))?;
                tracing::info!("Saved {} URLs to {}", urls.len(), path.display());
                Ok(path)
            }
        }
    }
}

fn write_lines<W: Write, E: Write>(
    file: W,
    urls: &NormalizedUrlSet,
    mut echo: Option<E>,
) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    for url in urls {
        writeln!(out, "{}", url)?;
        if let Some(e) = echo.as_mut() {
            writeln!(e, "{}", url)?;
        }
    }
    out.flush()?;
    if let Some(e) = echo.as_mut() {
        e.flush()?;
    }
    Ok(())
}

/// Startup reset: truncates `shared_file` (if given, creating it when
/// missing) and deletes the regular files inside `results_dir` (if it
/// exists). Subdirectories are left alone.
pub fn clean_slate(shared_file: Option<&Path>, results_dir: &Path) -> Result<()> {
    if let Some(path) = shared_file {
        fs::File::create(path).with_context(|| format!("truncate {}", path.display()))?;
        tracing::debug!(path = %path.display(), "cleared shared file");
    }

    if results_dir.is_dir() {
        let entries = fs::read_dir(results_dir)
            .with_context(|| format!("read results dir {}", results_dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)
                    .with_context(|| format!("delete {}", path.display()))?;
                tracing::debug!(path = %path.display(), "deleted previous result");
            }
        }
    }
    Ok(())
}
