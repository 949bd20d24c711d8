// Test harness for wiremock-based integration tests.
//
// ## How to write new tests
// 1. Create a TestServer: `let ts = TestServer::start().await;`
// 2. Mount the alert feed: `ts.mount_fixture("alerts").await;`
// 3. Run the binary: `ts.command().args(["alerts", "--json"]).assert().success();`
//
// The generated config registers cluster "test" (the default) with the mock server
// as its monitoring host, and cluster "bare" with no monitoring host.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the monitoring server serves its alert feed on.
pub const ALERTS_PATH: &str = "/ambarinagios/nagios/nagios_alerts.php";

pub struct TestServer {
    pub mock_server: MockServer,
    pub temp_dir: TempDir,
}

impl TestServer {
    /// Start a new wiremock server and prepare a temp config directory.
    pub async fn start() -> Self {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().expect("failed to create temp dir");

        // Write config.toml directly in temp dir; ALERTWATCH_CONFIG_DIR points here
        let port = mock_server.address().port();
        let config_content = format!(
            r#"default_cluster = "test"
request_timeout_secs = 5

[clusters.test]
monitoring_host = "127.0.0.1:{port}"

[clusters.bare]
"#
        );
        std::fs::write(temp_dir.path().join("config.toml"), config_content)
            .expect("failed to write config");

        Self {
            mock_server,
            temp_dir,
        }
    }

    pub fn monitoring_host(&self) -> String {
        format!("127.0.0.1:{}", self.mock_server.address().port())
    }

    /// Serve a fixture file as the alert feed.
    pub async fn mount_fixture(&self, name: &str) {
        self.mount_body(200, &fixture(name)).await;
    }

    /// Serve an arbitrary body and status code as the alert feed.
    pub async fn mount_body(&self, status_code: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(ALERTS_PATH))
            .and(query_param("q1", "alerts"))
            .and(query_param("alert_type", "all"))
            .respond_with(
                ResponseTemplate::new(status_code).set_body_raw(body.to_string(), "application/json"),
            )
            .mount(&self.mock_server)
            .await;
    }

    /// Number of alert feed requests the server has seen.
    pub async fn alert_requests(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == ALERTS_PATH)
            .count()
    }

    /// Build an assert_cmd Command pre-configured with the test environment.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("alertwatch").expect("binary not found");
        cmd.env("ALERTWATCH_CONFIG_DIR", self.temp_dir.path())
            .env_remove("ALERTWATCH_CLUSTER")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(format!("{}.json", name));
    std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("failed to read fixture: {}", fixture_path.display()))
}
