use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::cache::AlertCache;

/// Background thread that marks every cache entry stale on a fixed period.
///
/// Ticks are scheduled at a fixed rate from the start time. The thread holds only a
/// weak reference to the cache and exits when the cache is dropped, when
/// [`StaleMarker::stop`] is called, or when the marker itself is dropped.
pub struct StaleMarker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StaleMarker {
    pub fn spawn(cache: &Arc<AlertCache>, period: Duration) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let cache = Arc::downgrade(cache);

        let handle = thread::Builder::new()
            .name("alert-stale-marker".to_string())
            .spawn(move || run(cache, period, stop_rx))
            .context("failed to spawn stale marker thread")?;

        tracing::debug!(period_secs = period.as_secs_f64(), "started stale marker");

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("stale marker thread panicked");
            }
        }
    }
}

impl Drop for StaleMarker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(cache: Weak<AlertCache>, period: Duration, stop: mpsc::Receiver<()>) {
    // `None` when the deadline is past what `Instant` can represent: never tick.
    let mut next_tick = Instant::now().checked_add(period);
    if next_tick.is_none() {
        tracing::warn!(
            period_secs = period.as_secs(),
            "stale marker period too large, entries will not be marked"
        );
    }
    loop {
        let signal = match next_tick {
            Some(deadline) => {
                stop.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => stop.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match signal {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let Some(cache) = cache.upgrade() else {
            break;
        };
        let marked = cache.mark_all_stale();
        tracing::trace!(entries = marked, "marked alert cache stale");

        next_tick = next_tick.and_then(|tick| tick.checked_add(period));
        // Skip ticks missed while the thread was descheduled rather than bursting.
        let now = Instant::now();
        if next_tick.is_some_and(|tick| tick < now) {
            next_tick = now.checked_add(period);
        }
    }
    tracing::debug!("stale marker stopped");
}
