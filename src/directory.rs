use std::collections::BTreeMap;

use crate::config::Config;

/// Resolves which host runs the monitoring server for a cluster.
///
/// Returning `None` means the cluster has no monitoring role; that is not an error.
pub trait MonitoringDirectory: Send + Sync {
    fn monitoring_host(&self, cluster: &str) -> Option<String>;
}

/// Directory backed by a fixed cluster → host table, usually built from `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    hosts: BTreeMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, cluster: &str, host: &str) -> Self {
        self.hosts.insert(cluster.to_string(), host.to_string());
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let hosts = config
            .clusters
            .iter()
            .filter_map(|(name, entry)| {
                entry
                    .monitoring_host
                    .as_ref()
                    .filter(|h| !h.trim().is_empty())
                    .map(|h| (name.clone(), h.trim().to_string()))
            })
            .collect();
        Self { hosts }
    }
}

impl MonitoringDirectory for StaticDirectory {
    fn monitoring_host(&self, cluster: &str) -> Option<String> {
        self.hosts.get(cluster).cloned()
    }
}
