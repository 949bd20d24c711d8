use std::io::Read;
use std::sync::Arc;

use crate::alert::{sort_by_severity, AlertRecord, AlertsResponse};
use crate::client::StreamProvider;
use crate::directory::MonitoringDirectory;
use crate::error::FetchError;

/// Path and query served by the monitoring server's alert feed.
pub const ALERTS_PATH: &str = "/ambarinagios/nagios/nagios_alerts.php?q1=alerts&alert_type=all";

/// Result of one fetch attempt.
///
/// `NoMonitoring` and `Fetched` are both successful lookups; only `Failed` leaves a
/// cache entry stale.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<AlertRecord>),
    NoMonitoring,
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// Collapse to the list callers see: failures become an empty list.
    pub fn into_alerts(self) -> Vec<AlertRecord> {
        match self {
            FetchOutcome::Fetched(alerts) => alerts,
            FetchOutcome::NoMonitoring | FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Anything the cache can refresh a cluster's alerts from.
pub trait AlertSource: Send + Sync {
    fn fetch_outcome(&self, cluster: &str) -> FetchOutcome;

    fn fetch(&self, cluster: &str) -> Vec<AlertRecord> {
        self.fetch_outcome(cluster).into_alerts()
    }
}

/// Stateless fetcher: directory lookup, one HTTP round trip, decode, sort.
pub struct AlertFetcher {
    directory: Arc<dyn MonitoringDirectory>,
    streams: Arc<dyn StreamProvider>,
    use_tls: bool,
}

impl AlertFetcher {
    pub fn new(
        directory: Arc<dyn MonitoringDirectory>,
        streams: Arc<dyn StreamProvider>,
        use_tls: bool,
    ) -> Self {
        Self {
            directory,
            streams,
            use_tls,
        }
    }

    pub fn alerts_url(&self, host: &str) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}{}", scheme, host, ALERTS_PATH)
    }

    fn load(&self, url: &str) -> Result<Vec<AlertRecord>, FetchError> {
        // The reader is dropped at the end of this scope on every path.
        let mut stream = self.streams.read_from(url)?;

        let mut body = String::new();
        stream
            .read_to_string(&mut body)
            .map_err(|source| FetchError::Read {
                url: url.to_string(),
                source,
            })?;

        let response: AlertsResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;

        let mut alerts = response.alerts;
        sort_by_severity(&mut alerts);
        Ok(alerts)
    }
}

impl AlertSource for AlertFetcher {
    fn fetch_outcome(&self, cluster: &str) -> FetchOutcome {
        let Some(host) = self.directory.monitoring_host(cluster) else {
            tracing::debug!(%cluster, "no monitoring host registered, skipping alerts");
            return FetchOutcome::NoMonitoring;
        };

        let url = self.alerts_url(&host);
        match self.load(&url) {
            Ok(alerts) => {
                tracing::debug!(%cluster, count = alerts.len(), "fetched alerts");
                FetchOutcome::Fetched(alerts)
            }
            Err(e) => {
                tracing::error!(%cluster, url = %e.url(), error = %e, "failed to fetch alerts");
                FetchOutcome::Failed(e)
            }
        }
    }
}
