use std::process::Command;
use std::time::Duration;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("reqres-contract").expect("binary exists");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Mocks the delete-users surface, slow enough for the timeout probe to fire.
fn mock_delete_surface(server: &MockServer) {
    let latency = Duration::from_millis(20);
    for path in ["/api/users/2", "/api/users/9999"] {
        server.mock(|when, then| {
            when.method(DELETE).path(path);
            then.status(204).delay(latency);
        });
    }
    server.mock(|when, then| {
        when.method(DELETE).path("/api/userz/2");
        then.status(404).delay(latency);
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/users/2");
        then.status(405).delay(latency);
    });
}

#[test]
fn displays_help() {
    let mut cmd = cargo_bin();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Contract checks for the reqres users API"));
}

#[test]
fn displays_version() {
    let mut cmd = cargo_bin();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn lists_catalogs_without_sending_requests() {
    let mut cmd = cargo_bin();
    cmd.args(["--list", "--catalog", "get-unknown"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("get-unknown"))
        .stdout(predicate::str::contains("invalid_resource"))
        .stdout(predicate::str::contains("post-users").not());
}

#[test]
fn malformed_header_is_fatal() {
    let mut cmd = cargo_bin();
    cmd.args(["--list", "-H", "no-colon-here"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--header"));
}

#[test]
fn unknown_catalog_is_rejected() {
    let mut cmd = cargo_bin();
    cmd.args(["--catalog", "patch-users"]);
    cmd.assert().failure();
}

#[test]
fn passing_run_writes_junit_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = MockServer::start();
    mock_delete_surface(&server);

    let mut cmd = cargo_bin();
    cmd.current_dir(temp.path())
        .arg("--base-url")
        .arg(server.url("/api"))
        .args(["--catalog", "delete-users"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("delete-users::successful_delete"))
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("Report: test-reports/results.xml"));

    let report = temp.child("test-reports/results.xml");
    report.assert(predicate::path::exists());
    report.assert(predicate::str::contains(
        "<testsuite name=\"delete-users\" tests=\"10\" failures=\"0\" errors=\"0\"",
    ));
}

#[test]
fn failing_run_exits_with_one_and_still_reports() {
    let temp = assert_fs::TempDir::new().unwrap();
    // Nothing is mocked, so every call comes back 404.
    let server = MockServer::start();
    let report = temp.child("out/report.json");

    let mut cmd = cargo_bin();
    cmd.arg("--base-url")
        .arg(server.url("/api"))
        .args(["--catalog", "delete-users", "--format", "json", "--report"])
        .arg(report.path());

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("expected status 204, got 404"));

    let raw = std::fs::read_to_string(report.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = parsed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert!(entries
        .iter()
        .any(|entry| entry["scenario"] == "successful_delete" && entry["status"] == "fail"));
}
