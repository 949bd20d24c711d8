#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_contains_description() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cluster alert summaries from the monitoring server",
        ));
}

#[test]
fn test_version() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("alertwatch"));
}

#[test]
fn test_clusters_list_no_config() {
    let temp = tempfile::TempDir::new().unwrap();
    Command::cargo_bin("alertwatch")
        .unwrap()
        .env("ALERTWATCH_CONFIG_DIR", temp.path())
        .args(["clusters", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clusters configured"));
}

#[test]
fn test_alerts_without_cluster_shows_error() {
    let temp = tempfile::TempDir::new().unwrap();
    Command::cargo_bin("alertwatch")
        .unwrap()
        .env("ALERTWATCH_CONFIG_DIR", temp.path())
        .env_remove("ALERTWATCH_CLUSTER")
        .arg("alerts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no default cluster configured"));
}

#[test]
fn test_host_and_service_conflict() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .args(["alerts", "--host", "h1", "--service", "HDFS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_watch_help() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval"))
        .stdout(predicate::str::contains("--host"));
}

#[test]
fn test_zero_timeout_rejected() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .args(["alerts", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '0'"))
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_zero_watch_interval_rejected() {
    Command::cargo_bin("alertwatch")
        .unwrap()
        .args(["watch", "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--interval"));
}

#[test]
fn test_invalid_config_reports_path() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "default_cluster = \"c1\"\nrefresh_interval_secs = 0\n[clusters.c1]\n",
    )
    .unwrap();

    Command::cargo_bin("alertwatch")
        .unwrap()
        .env("ALERTWATCH_CONFIG_DIR", temp.path())
        .arg("alerts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"))
        .stderr(predicate::str::contains("refresh_interval_secs must be > 0"));
}
