use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alert::{AlertRecord, AlertStatus};

/// Which alert attribute a resource is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Host,
    Service,
}

impl MatchField {
    fn value_of(self, alert: &AlertRecord) -> &str {
        match self {
            MatchField::Host => &alert.host,
            MatchField::Service => &alert.service,
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchField::Host => f.write_str("host"),
            MatchField::Service => f.write_str("service"),
        }
    }
}

impl FromStr for MatchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "host" => Ok(MatchField::Host),
            "service" => Ok(MatchField::Service),
            other => Err(format!("unknown match field: {}", other)),
        }
    }
}

/// Flattened view of one matched alert, as attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDetail {
    pub description: String,
    pub host_name: String,
    pub last_status: String,
    pub last_status_time: i64,
    pub service_name: String,
    pub status: String,
    pub status_time: i64,
    pub output: String,
}

impl From<&AlertRecord> for AlertDetail {
    fn from(alert: &AlertRecord) -> Self {
        Self {
            description: alert.description.clone(),
            host_name: alert.host.clone(),
            last_status: alert.last_status.as_str().to_string(),
            last_status_time: alert.last_status_time,
            service_name: alert.service.clone(),
            status: alert.status.as_str().to_string(),
            status_time: alert.status_time,
            output: alert.output.clone(),
        }
    }
}

/// Per-resource alert summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub ok_count: u32,
    pub warning_count: u32,
    pub critical_count: u32,
    pub details: Vec<AlertDetail>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// Count and collect the alerts whose `field` equals `value`.
///
/// Details keep the input order, so a critical-first list yields critical-first details.
/// Unknown statuses produce a detail but no count.
pub fn match_alerts(alerts: &[AlertRecord], field: MatchField, value: &str) -> MatchResult {
    let mut result = MatchResult::default();

    for alert in alerts.iter().filter(|a| field.value_of(a) == value) {
        count(&mut result, alert);
    }

    result
}

/// Summary over every alert in the list, regardless of host or service.
pub fn summarize(alerts: &[AlertRecord]) -> MatchResult {
    let mut result = MatchResult::default();
    for alert in alerts {
        count(&mut result, alert);
    }
    result
}

fn count(result: &mut MatchResult, alert: &AlertRecord) {
    match alert.status {
        AlertStatus::Ok => result.ok_count += 1,
        AlertStatus::Warning => result.warning_count += 1,
        AlertStatus::Critical => result.critical_count += 1,
        AlertStatus::Unknown(_) => {}
    }
    result.details.push(AlertDetail::from(alert));
}
