use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::archive::DEFAULT_ARCHIVE_URL;
use crate::fetch::{Fetcher, HttpOptions};
use crate::output::DEFAULT_RESULTS_DIR;
use crate::retry::RetryPolicy;
use crate::url_model::{ExtensionDenylist, Normalizer, DEFAULT_PLACEHOLDER};
use crate::user_agent::UserAgentPool;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per domain fetch (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts (e.g. 0.5 = 500ms).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 5.0,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        let delay = Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO);
        RetryPolicy::new(self.max_attempts, delay)
    }
}

/// HTTP transport parameters (optional section in config.toml).
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Hard limit for one attempt, in seconds.
    pub timeout_secs: u64,
    /// Bytes/s below which a transfer is aborted after `low_speed_time_secs`;
    /// 0 turns the check off.
    pub low_speed_limit: u32,
    pub low_speed_time_secs: u64,
    /// Replaces the built-in user-agent pool when non-empty.
    pub user_agents: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let http = HttpOptions::default();
        Self {
            connect_timeout_secs: http.connect_timeout.as_secs(),
            timeout_secs: http.timeout.as_secs(),
            low_speed_limit: http.low_speed_limit,
            low_speed_time_secs: http.low_speed_time.as_secs(),
            user_agents: Vec::new(),
        }
    }
}

impl HttpConfig {
    pub fn options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            low_speed_limit: self.low_speed_limit,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
        }
    }
}

/// What an interrupt (Ctrl-C) does to a multi-domain run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptPolicy {
    /// Give up on the current domain and continue with the next one.
    #[default]
    SkipDomain,
    /// Stop the whole batch.
    AbortBatch,
}

/// Global configuration loaded from `~/.config/paraminer/config.toml`.
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParaminerConfig {
    /// Base URL of the CDX index server.
    pub archive_url: String,
    /// Proxy for archive requests (HTTP and HTTPS).
    pub proxy: Option<String>,
    /// Value substituted for every query parameter.
    pub placeholder: String,
    /// Directory for per-domain result files.
    pub results_dir: PathBuf,
    /// Domains processed concurrently (1 = strictly sequential).
    pub jobs: usize,
    pub on_interrupt: InterruptPolicy,
    /// Optional extension denylist; if missing, the built-in list is used.
    pub extensions: Option<Vec<String>>,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
    /// Optional HTTP settings; if missing, built-in defaults are used.
    pub http: Option<HttpConfig>,
}

impl Default for ParaminerConfig {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            proxy: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            jobs: 1,
            on_interrupt: InterruptPolicy::default(),
            extensions: None,
            retry: None,
            http: None,
        }
    }
}

impl ParaminerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn denylist(&self) -> ExtensionDenylist {
        match &self.extensions {
            Some(list) => ExtensionDenylist::new(list),
            None => ExtensionDenylist::default(),
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.denylist(), self.placeholder.clone())
    }

    pub fn fetcher(&self) -> Fetcher {
        let http = self.http.clone().unwrap_or_default();
        let options = http.options();
        Fetcher::new(
            self.retry_policy(),
            UserAgentPool::from_agents(http.user_agents),
            options,
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("paraminer")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ParaminerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ParaminerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ParaminerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ParaminerConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
