use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::AlertCache;
use crate::matcher::{match_alerts, MatchField, MatchResult};

pub const ALERTS: &str = "alerts";
pub const ALERT_SUMMARY: &str = "alerts/summary";
pub const ALERT_SUMMARY_OK: &str = "alerts/summary/OK";
pub const ALERT_SUMMARY_WARNING: &str = "alerts/summary/WARNING";
pub const ALERT_SUMMARY_CRITICAL: &str = "alerts/summary/CRITICAL";
pub const ALERT_DETAIL: &str = "alerts/detail";

/// A host or service carrying the properties alerts are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: MatchField,
    pub cluster: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Resource {
    pub fn host(cluster: &str, name: &str) -> Self {
        Self::new(MatchField::Host, cluster, name)
    }

    pub fn service(cluster: &str, name: &str) -> Self {
        Self::new(MatchField::Service, cluster, name)
    }

    fn new(kind: MatchField, cluster: &str, name: &str) -> Self {
        Self {
            kind,
            cluster: Some(cluster.to_string()),
            name: Some(name.to_string()),
            properties: BTreeMap::new(),
        }
    }

    pub fn property(&self, id: &str) -> Option<&Value> {
        self.properties.get(id)
    }
}

/// Property ids a caller asked for. Empty means "everything"; an id also selects every
/// property nested beneath it, so `alerts/summary` selects all three counts.
#[derive(Debug, Clone, Default)]
pub struct PropertyRequest {
    ids: BTreeSet<String>,
}

impl PropertyRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|s| s.into().trim_end_matches('/').to_string())
                .collect(),
        }
    }

    pub fn includes(&self, id: &str) -> bool {
        if self.ids.is_empty() {
            return true;
        }
        self.ids.iter().any(|requested| {
            id == requested
                || id
                    .strip_prefix(requested.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Whether any alert property at all is requested.
    pub fn wants_alerts(&self) -> bool {
        [
            ALERT_SUMMARY_OK,
            ALERT_SUMMARY_WARNING,
            ALERT_SUMMARY_CRITICAL,
            ALERT_DETAIL,
        ]
        .iter()
        .any(|id| self.includes(id))
    }
}

/// Attach a match result to a resource, restricted to the requested ids.
///
/// Counts are always set when requested; `alerts/detail` only when something matched.
pub fn apply(resource: &mut Resource, result: &MatchResult, request: &PropertyRequest) {
    let mut set = |id: &str, value: Value| {
        if request.includes(id) {
            resource.properties.insert(id.to_string(), value);
        }
    };

    set(ALERT_SUMMARY_OK, Value::from(result.ok_count));
    set(ALERT_SUMMARY_WARNING, Value::from(result.warning_count));
    set(ALERT_SUMMARY_CRITICAL, Value::from(result.critical_count));

    if !result.details.is_empty() {
        match serde_json::to_value(&result.details) {
            Ok(details) => set(ALERT_DETAIL, details),
            Err(e) => tracing::warn!(error = %e, "failed to serialize alert details"),
        }
    }
}

/// Populates alert properties on hosts and services from the shared cache.
pub struct AlertPropertyProvider {
    cache: Arc<AlertCache>,
}

impl AlertPropertyProvider {
    pub fn new(cache: Arc<AlertCache>) -> Self {
        Self { cache }
    }

    /// Resources without a cluster or a name are left untouched, as are resources in
    /// clusters that currently report no alerts at all.
    pub fn populate(&self, resources: &mut [Resource], request: &PropertyRequest) {
        if !request.wants_alerts() {
            return;
        }

        for resource in resources.iter_mut() {
            let (Some(cluster), Some(name)) = (resource.cluster.clone(), resource.name.clone())
            else {
                continue;
            };

            let alerts = self.cache.get(&cluster);
            if alerts.is_empty() {
                continue;
            }

            let result = match_alerts(&alerts, resource.kind, &name);
            apply(resource, &result, request);
        }
    }
}
