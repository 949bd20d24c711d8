use anyhow::Result;
use serde::Serialize;

use alertwatch::config::{load_config, save_config, ClusterEntry};
use alertwatch::error::AlertwatchError;

use crate::output::{print_table, print_value};

pub fn add(name: String, monitoring_host: Option<String>, default: bool) -> Result<()> {
    let mut config = load_config()?;

    if config.clusters.contains_key(&name) {
        return Err(AlertwatchError::ClusterExists(name).into());
    }

    config
        .clusters
        .insert(name.clone(), ClusterEntry { monitoring_host });

    if default || config.default_cluster.is_none() {
        config.default_cluster = Some(name.clone());
    }

    save_config(&config)?;
    println!("Cluster '{}' added.", name);
    if config.default_cluster.as_deref() == Some(&name) {
        println!("Set as default cluster.");
    }
    Ok(())
}

#[derive(Serialize)]
struct ClusterRow {
    name: String,
    monitoring_host: Option<String>,
    default: bool,
}

pub fn list(json_mode: bool) -> Result<()> {
    let config = load_config()?;

    if config.clusters.is_empty() && !json_mode {
        println!("No clusters configured. Use `alertwatch clusters add` to register one.");
        return Ok(());
    }

    let default = config.default_cluster.as_deref().unwrap_or("");
    let rows: Vec<ClusterRow> = config
        .clusters
        .iter()
        .map(|(name, entry)| ClusterRow {
            name: name.clone(),
            monitoring_host: entry.monitoring_host.clone(),
            default: name == default,
        })
        .collect();

    print_value(&rows, json_mode, |rows| {
        let table: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    if r.default {
                        format!("{} (default)", r.name)
                    } else {
                        r.name.clone()
                    },
                    r.monitoring_host.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        print_table(&["name", "monitoring_host"], &table);
    });
    Ok(())
}

pub fn remove(name: String) -> Result<()> {
    let mut config = load_config()?;

    if config.clusters.remove(&name).is_none() {
        return Err(AlertwatchError::ClusterNotFound(name).into());
    }

    if config.default_cluster.as_deref() == Some(&name) {
        config.default_cluster = None;
    }

    save_config(&config)?;
    println!("Cluster '{}' removed.", name);
    Ok(())
}
