use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Health level reported by the monitoring endpoint.
///
/// Wire codes: 0 → OK, 1 → WARNING, 2 → CRITICAL. Any other code decodes as `Unknown`,
/// which keeps the raw code so sorting and re-serialization see what the server sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum AlertStatus {
    Ok,
    Warning,
    Critical,
    Unknown(i64),
}

/// Code the monitoring server uses for UNKNOWN.
pub const UNKNOWN_CODE: i64 = 3;

impl Default for AlertStatus {
    fn default() -> Self {
        AlertStatus::Unknown(UNKNOWN_CODE)
    }
}

impl AlertStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => AlertStatus::Ok,
            1 => AlertStatus::Warning,
            2 => AlertStatus::Critical,
            other => AlertStatus::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            AlertStatus::Ok => 0,
            AlertStatus::Warning => 1,
            AlertStatus::Critical => 2,
            AlertStatus::Unknown(code) => code,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Ok => "OK",
            AlertStatus::Warning => "WARNING",
            AlertStatus::Critical => "CRITICAL",
            AlertStatus::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<i64> for AlertStatus {
    fn from(code: i64) -> Self {
        AlertStatus::from_code(code)
    }
}

impl From<AlertStatus> for i64 {
    fn from(status: AlertStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alert as reported by the monitoring endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, deserialize_with = "status_code")]
    pub status: AlertStatus,
    #[serde(default, deserialize_with = "status_code")]
    pub last_status: AlertStatus,
    #[serde(default, deserialize_with = "epoch")]
    pub status_time: i64,
    #[serde(default, deserialize_with = "epoch")]
    pub last_status_time: i64,
    #[serde(default)]
    pub output: String,
}

/// Response envelope: `{"alerts": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct AlertsResponse {
    pub alerts: Vec<AlertRecord>,
}

/// Sort by wire status code, highest first: UNKNOWN (3), CRITICAL, WARNING, OK.
/// Out-of-range codes sort by their value. The sort is stable, so equal codes keep
/// fetch order.
pub fn sort_by_severity(alerts: &mut [AlertRecord]) {
    alerts.sort_by_key(|a| Reverse(a.status.code()));
}

/// Integers on the wire sometimes arrive as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            IntOrString::Int(n) => Ok(n),
            IntOrString::Str(s) if s.trim().is_empty() => Ok(0),
            IntOrString::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected integer, got {:?}", s))),
        }
    }
}

fn epoch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    IntOrString::deserialize(deserializer)?.into_i64()
}

fn status_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AlertStatus, D::Error> {
    Ok(AlertStatus::from_code(
        IntOrString::deserialize(deserializer)?.into_i64()?,
    ))
}

#[cfg(test)]
pub(crate) fn record(host: &str, service: &str, status: AlertStatus) -> AlertRecord {
    AlertRecord {
        description: format!("{} check", service),
        host: host.to_string(),
        service: service.to_string(),
        status,
        last_status: AlertStatus::Ok,
        status_time: 1_700_000_000,
        last_status_time: 1_699_999_000,
        output: format!("{} on {}", status, host),
    }
}
