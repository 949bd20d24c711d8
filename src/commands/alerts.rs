use anyhow::Result;
use serde::Serialize;

use alertwatch::cache::CacheRead;
use alertwatch::matcher::{match_alerts, summarize, MatchField, MatchResult};
use alertwatch::AlertRecord;

use super::Engine;
use crate::cli::MatchOpts;
use crate::output::{print_details, print_value, summary_line};

/// JSON shape of `alerts` and each `watch` frame.
#[derive(Debug, Serialize)]
pub struct AlertReport {
    pub cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_field: Option<MatchField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_value: Option<String>,
    /// "cached", "refreshed" or "failed"
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl AlertReport {
    pub fn build(cluster: &str, matching: &MatchOpts, read: CacheRead) -> Self {
        let (source, error) = match &read {
            CacheRead::Cached(_) => ("cached", None),
            CacheRead::Refreshed(_) => ("refreshed", None),
            CacheRead::RefreshFailed(e) => ("failed", Some(e.to_string())),
        };
        let alerts = read.into_alerts();
        let selector = matching.selector();

        Self {
            cluster: cluster.to_string(),
            match_field: selector.map(|(field, _)| field),
            match_value: selector.map(|(_, value)| value.to_string()),
            source,
            error,
            result: select(&alerts, selector),
        }
    }

    pub fn print_human(&self) {
        match (&self.match_field, &self.match_value) {
            (Some(field), Some(value)) => {
                println!("Cluster: {}  {}: {}", self.cluster, field, value)
            }
            _ => println!("Cluster: {}", self.cluster),
        }
        if let Some(error) = &self.error {
            println!("Monitoring server unreachable: {}", error);
        }
        println!("{}", summary_line(&self.result));
        println!();
        print_details(&self.result.details);
    }
}

fn select(alerts: &[AlertRecord], selector: Option<(MatchField, &str)>) -> MatchResult {
    match selector {
        Some((field, value)) => match_alerts(alerts, field, value),
        None => summarize(alerts),
    }
}

pub fn show(engine: &Engine, cluster: &str, matching: &MatchOpts, json_mode: bool) -> Result<()> {
    let report = AlertReport::build(cluster, matching, engine.cache.get_outcome(cluster));
    print_value(&report, json_mode, AlertReport::print_human);
    Ok(())
}
