mod harness;

use predicates::prelude::*;

fn parse(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("invalid JSON output")
}

/// Test: whole-cluster summary counts every alert and lists them critical-first.
#[tokio::test]
async fn test_alerts_json_summary() {
    let ts = harness::TestServer::start().await;
    ts.mount_fixture("alerts").await;

    let output = ts
        .command()
        .args(["alerts", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["cluster"], "test");
    assert_eq!(json["source"], "refreshed");
    assert_eq!(json["critical_count"], 1);
    assert_eq!(json["warning_count"], 1);
    assert_eq!(json["ok_count"], 2);

    let statuses: Vec<&str> = json["details"]
        .as_array()
        .expect("details array")
        .iter()
        .map(|d| d["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["CRITICAL", "WARNING", "OK", "OK"]);
    assert_eq!(ts.alert_requests().await, 1);
}

/// Test: --host narrows to one host's alerts.
#[tokio::test]
async fn test_alerts_for_host() {
    let ts = harness::TestServer::start().await;
    ts.mount_fixture("alerts").await;

    let output = ts
        .command()
        .args(["alerts", "--host", "node1.example.com", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["match_field"], "host");
    assert_eq!(json["match_value"], "node1.example.com");
    assert_eq!(json["critical_count"], 1);
    assert_eq!(json["warning_count"], 1);
    assert_eq!(json["ok_count"], 0);

    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["host_name"], "node1.example.com");
    assert_eq!(details[0]["service_name"], "HDFS");
    assert_eq!(details[0]["last_status"], "OK");
    assert_eq!(details[1]["status_time"], 1700000200);
}

/// Test: --service narrows to one service's alerts.
#[tokio::test]
async fn test_alerts_for_service() {
    let ts = harness::TestServer::start().await;
    ts.mount_fixture("alerts").await;

    let output = ts
        .command()
        .args(["alerts", "--service", "ZOOKEEPER", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["ok_count"], 1);
    assert_eq!(json["critical_count"], 0);
    assert_eq!(json["details"].as_array().unwrap().len(), 1);
}

/// Test: human output shows the summary line and the alert table.
#[tokio::test]
async fn test_alerts_human_output() {
    let ts = harness::TestServer::start().await;
    ts.mount_fixture("alerts").await;

    ts.command()
        .arg("alerts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster: test"))
        .stdout(predicate::str::contains("CRITICAL 1"))
        .stdout(predicate::str::contains("DataNode process"))
        .stdout(predicate::str::contains("STATUS"));
}

/// Test: a 500 from the monitoring server is not fatal; the result is empty and flagged.
#[tokio::test]
async fn test_alerts_server_error_degrades_to_empty() {
    let ts = harness::TestServer::start().await;
    ts.mount_body(500, "internal error").await;

    let output = ts
        .command()
        .args(["alerts", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["source"], "failed");
    assert_eq!(json["critical_count"], 0);
    assert!(json["details"].as_array().unwrap().is_empty());
    assert!(json["error"].as_str().unwrap().contains("500"));
}

/// Test: malformed JSON from the monitoring server degrades to an empty result.
#[tokio::test]
async fn test_alerts_malformed_body_degrades_to_empty() {
    let ts = harness::TestServer::start().await;
    ts.mount_body(200, "{\"alerts\": [").await;

    let output = ts
        .command()
        .args(["alerts", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["source"], "failed");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("failed to parse response"));
}

/// Test: unreachable monitoring server reports the failure in human output.
#[tokio::test]
async fn test_alerts_unreachable_human_output() {
    let ts = harness::TestServer::start().await;
    // Nothing mounted: wiremock answers 404.

    ts.command()
        .arg("alerts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monitoring server unreachable"))
        .stdout(predicate::str::contains("No alerts."));
}

/// Test: a cluster without a monitoring host reports no alerts and makes no request.
#[tokio::test]
async fn test_alerts_cluster_without_monitoring() {
    let ts = harness::TestServer::start().await;
    ts.mount_fixture("alerts").await;

    let output = ts
        .command()
        .args(["alerts", "--cluster", "bare", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let json = parse(&output.stdout);
    assert_eq!(json["cluster"], "bare");
    assert_eq!(json["source"], "refreshed");
    assert!(json.get("error").is_none());
    assert!(json["details"].as_array().unwrap().is_empty());
    assert_eq!(ts.alert_requests().await, 0);
}

/// Test: unknown --cluster is rejected before any request.
#[tokio::test]
async fn test_alerts_unknown_cluster() {
    let ts = harness::TestServer::start().await;

    ts.command()
        .args(["alerts", "--cluster", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cluster not found: ghost"));
}
