use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::alert::AlertRecord;
use crate::error::FetchError;
use crate::fetcher::{AlertSource, FetchOutcome};

/// Cached alerts for one cluster.
///
/// `alerts` and `stale` are only ever read or written together under the slot's
/// state lock, so a reader never pairs a list with a flag from a different refresh.
#[derive(Debug)]
struct CacheEntry {
    alerts: Arc<[AlertRecord]>,
    stale: bool,
    /// Incremented on every mark. A refresh only clears `stale` if no mark landed
    /// while it was in flight.
    epoch: u64,
}

struct Slot {
    state: RwLock<CacheEntry>,
    /// Held for the duration of a refresh: at most one fetch per cluster at a time.
    refresh: Mutex<()>,
}

impl Slot {
    fn new() -> Self {
        Self {
            state: RwLock::new(CacheEntry {
                alerts: Arc::from(Vec::new()),
                stale: true,
                epoch: 0,
            }),
            refresh: Mutex::new(()),
        }
    }
}

/// What a cache read did, for callers that need to tell "no alerts" from "fetch failed".
#[derive(Debug)]
pub enum CacheRead {
    /// Served from a fresh entry, no network call.
    Cached(Arc<[AlertRecord]>),
    /// Entry was absent or stale and has been replaced.
    Refreshed(Arc<[AlertRecord]>),
    /// Refresh failed; the entry keeps its previous alerts and stays stale.
    RefreshFailed(FetchError),
}

impl CacheRead {
    /// The list `AlertCache::get` returns: a failed refresh yields an empty list,
    /// not the last good one.
    pub fn into_alerts(self) -> Arc<[AlertRecord]> {
        match self {
            CacheRead::Cached(alerts) | CacheRead::Refreshed(alerts) => alerts,
            CacheRead::RefreshFailed(_) => Arc::from(Vec::new()),
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheRead::Cached(_))
    }
}

/// Per-cluster alert cache with stale-on-schedule invalidation.
///
/// Entries are created on first access and live until [`AlertCache::force_reset`].
/// Marking (see [`crate::scheduler::StaleMarker`]) only flips flags; fetching happens
/// on the reader's thread, inside [`AlertCache::get`].
pub struct AlertCache {
    source: Arc<dyn AlertSource>,
    entries: RwLock<HashMap<String, Arc<Slot>>>,
}

impl AlertCache {
    pub fn new(source: Arc<dyn AlertSource>) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Current alerts for a cluster, refreshing first if the entry is absent or stale.
    pub fn get(&self, cluster: &str) -> Arc<[AlertRecord]> {
        self.get_outcome(cluster).into_alerts()
    }

    pub fn get_outcome(&self, cluster: &str) -> CacheRead {
        let slot = self.slot(cluster);

        {
            let state = read(&slot.state);
            if !state.stale {
                return CacheRead::Cached(state.alerts.clone());
            }
        }

        let _refresh = lock(&slot.refresh);

        // Another reader may have refreshed while we waited for the lock.
        let epoch = {
            let state = read(&slot.state);
            if !state.stale {
                return CacheRead::Cached(state.alerts.clone());
            }
            state.epoch
        };

        tracing::debug!(%cluster, "alerts are stale, refreshing");

        match self.source.fetch_outcome(cluster) {
            FetchOutcome::Failed(e) => {
                tracing::warn!(%cluster, error = %e, "alert refresh failed, entry stays stale");
                CacheRead::RefreshFailed(e)
            }
            outcome => {
                let alerts: Arc<[AlertRecord]> = Arc::from(outcome.into_alerts());
                let mut state = write(&slot.state);
                state.alerts = alerts.clone();
                state.stale = state.epoch != epoch;
                if state.stale {
                    tracing::debug!(%cluster, "entry marked stale during refresh");
                }
                CacheRead::Refreshed(alerts)
            }
        }
    }

    /// Mark every entry stale. Returns how many entries were marked.
    pub fn mark_all_stale(&self) -> usize {
        let entries = read(&self.entries);
        for slot in entries.values() {
            let mut state = write(&slot.state);
            state.stale = true;
            state.epoch = state.epoch.wrapping_add(1);
        }
        entries.len()
    }

    /// Drop every entry; the next read of any cluster behaves like a first access.
    pub fn force_reset(&self) {
        write(&self.entries).clear();
    }

    /// `None` when the cluster has never been read (or was reset).
    pub fn is_stale(&self, cluster: &str) -> Option<bool> {
        read(&self.entries)
            .get(cluster)
            .map(|slot| read(&slot.state).stale)
    }

    pub fn clusters(&self) -> Vec<String> {
        let mut keys: Vec<String> = read(&self.entries).keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.entries).is_empty()
    }

    fn slot(&self, cluster: &str) -> Arc<Slot> {
        if let Some(slot) = read(&self.entries).get(cluster) {
            return slot.clone();
        }
        write(&self.entries)
            .entry(cluster.to_string())
            .or_insert_with(|| Arc::new(Slot::new()))
            .clone()
    }
}

// Poisoning is ignored: every write under these locks replaces whole fields.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
