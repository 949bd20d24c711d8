use thiserror::Error;

/// Why a single fetch from the monitoring endpoint produced no alerts.
///
/// None of these reach `AlertCache::get` callers; they are logged and turned into
/// an empty alert list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("monitoring endpoint {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Read { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

#[derive(Debug, Error)]
pub enum AlertwatchError {
    #[error("cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("no default cluster configured — use `alertwatch clusters add <name> --monitoring-host <host> --default` or `--cluster <name>`")]
    NoDefaultCluster,

    #[error("cluster already exists: {0}")]
    ClusterExists(String),

    #[error("config error: {0}")]
    ConfigError(String),
}
