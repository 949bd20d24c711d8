use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AlertwatchError;

/// How often every cached entry is marked stale.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 20;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_cluster: Option<String>,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Address the monitoring endpoint over https instead of http.
    #[serde(default)]
    pub monitoring_tls: bool,
    /// Skip certificate verification when `monitoring_tls` is set.
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub clusters: BTreeMap<String, ClusterEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterEntry {
    /// Host (optionally `host:port`) running the monitoring server. Absent means the
    /// cluster has no monitoring role and always reports no alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_host: Option<String>,
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_cluster: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            monitoring_tls: false,
            insecure: false,
            clusters: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(
                AlertwatchError::ConfigError("refresh_interval_secs must be > 0".into()).into(),
            );
        }
        if self.request_timeout_secs == 0 {
            return Err(
                AlertwatchError::ConfigError("request_timeout_secs must be > 0".into()).into(),
            );
        }
        Ok(())
    }
}

/// Returns the config directory: ~/.config/alertwatch/ on Linux, %APPDATA%\alertwatch\ on Windows.
/// Override with ALERTWATCH_CONFIG_DIR env var (used by test harness).
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ALERTWATCH_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj = directories::ProjectDirs::from("", "", "alertwatch")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().to_path_buf())
}

/// Returns the full path to config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from disk, returning a default Config if the file doesn't exist
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

/// Save config to disk, creating the directory if needed
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Resolve which cluster to query: --cluster flag > ALERTWATCH_CLUSTER env (via clap) > default_cluster > error
pub fn resolve_cluster(config: &Config, flag_cluster: &Option<String>) -> Result<String> {
    let name = match flag_cluster {
        Some(name) => name.clone(),
        None => config
            .default_cluster
            .clone()
            .ok_or(AlertwatchError::NoDefaultCluster)?,
    };
    if !config.clusters.contains_key(&name) {
        return Err(AlertwatchError::ClusterNotFound(name).into());
    }
    Ok(name)
}
