pub mod alerts;
pub mod clusters;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use alertwatch::cache::AlertCache;
use alertwatch::client::HttpStreamProvider;
use alertwatch::config::Config;
use alertwatch::directory::StaticDirectory;
use alertwatch::fetcher::AlertFetcher;
use alertwatch::matcher::MatchField;
use alertwatch::scheduler::StaleMarker;

use crate::cli::MatchOpts;

/// The running cache plus its stale marker. Dropping it stops the marker thread.
pub struct Engine {
    pub cache: Arc<AlertCache>,
    _marker: StaleMarker,
}

impl Engine {
    pub fn start(config: &Config, timeout_override: Option<u64>) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_override.unwrap_or(config.request_timeout_secs));
        let streams = HttpStreamProvider::new(timeout, config.insecure)?;
        let fetcher = AlertFetcher::new(
            Arc::new(StaticDirectory::from_config(config)),
            Arc::new(streams),
            config.monitoring_tls,
        );
        let cache = Arc::new(AlertCache::new(Arc::new(fetcher)));
        let marker = StaleMarker::spawn(&cache, config.refresh_interval())?;
        Ok(Self {
            cache,
            _marker: marker,
        })
    }
}

impl MatchOpts {
    pub fn selector(&self) -> Option<(MatchField, &str)> {
        if let Some(host) = self.host.as_deref() {
            Some((MatchField::Host, host))
        } else {
            self.service
                .as_deref()
                .map(|service| (MatchField::Service, service))
        }
    }
}
