//! Per-cluster cache of monitoring alerts, refreshed on a fixed schedule, plus the
//! matching that turns a cluster's alert list into host and service summaries.

pub mod alert;
pub mod cache;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetcher;
pub mod matcher;
pub mod properties;
pub mod scheduler;

pub use alert::{AlertRecord, AlertStatus};
pub use cache::{AlertCache, CacheRead};
pub use client::{HttpStreamProvider, StreamProvider};
pub use directory::{MonitoringDirectory, StaticDirectory};
pub use error::{AlertwatchError, FetchError};
pub use fetcher::{AlertFetcher, AlertSource, FetchOutcome};
pub use matcher::{match_alerts, summarize, AlertDetail, MatchField, MatchResult};
pub use properties::{AlertPropertyProvider, PropertyRequest, Resource};
pub use scheduler::StaleMarker;
