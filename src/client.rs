use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::error::FetchError;

/// Opens a readable response body for a fully formed URL.
///
/// The returned reader owns the underlying connection; dropping it releases the stream.
pub trait StreamProvider: Send + Sync {
    fn read_from(&self, url: &str) -> Result<Box<dyn Read + Send>, FetchError>;
}

/// Blocking HTTP stream provider. Every request is bounded by the client timeout,
/// so a stalled monitoring server surfaces as a transport failure.
pub struct HttpStreamProvider {
    client: Client,
}

impl HttpStreamProvider {
    pub fn new(timeout: Duration, insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl StreamProvider for HttpStreamProvider {
    fn read_from(&self, url: &str) -> Result<Box<dyn Read + Send>, FetchError> {
        tracing::debug!(%url, "requesting alerts");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!(status = %status.as_u16(), "received response");

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(Box::new(response))
    }
}
