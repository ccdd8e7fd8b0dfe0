use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const AXE_OUTPUT: &str = r#"{"violations":[{"id":"image-alt","impact":"critical","tags":["wcag2a","wcag111"],"nodes":[{"target":["img"],"html":"<img>"}]}]}"#;

/// A command isolated from the caller's config and environment.
fn cmd(dir: &Path) -> Command {
    let mut c = Command::cargo_bin("sentinel").unwrap();
    c.current_dir(dir)
        .env("HOME", dir)
        .env_remove("DB_PATH")
        .env_remove("SENTINEL_DB_PATH")
        .env_remove("WEBHOOK_URL")
        .env_remove("SENTINEL_WEBHOOK_URL")
        .env_remove("WEBHOOK_SERVER_AUTH_TOKEN")
        .env_remove("SENTINEL_AUTH_TOKEN")
        .env_remove("SENTINEL_SCANNER_COMMAND");
    c
}

fn with_webhook(c: &mut Command) -> &mut Command {
    c.env("SENTINEL_WEBHOOK_URL", "http://127.0.0.1:1/regression")
        .env("SENTINEL_AUTH_TOKEN", "token")
}

#[test]
fn init_db_creates_store() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["--db", "store.db", "init-db"])
        .assert()
        .success()
        .stdout(contains("schema v2"));
    assert!(dir.path().join("store.db").exists());
}

#[test]
fn scan_without_baseline_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut c = cmd(dir.path());
    with_webhook(&mut c)
        .args(["scan", "http://example.test"])
        .assert()
        .success()
        .stdout(contains("no baseline exists for http://example.test"));
}

#[test]
fn compare_on_empty_store_reports_no_target() {
    let dir = TempDir::new().unwrap();
    let mut c = cmd(dir.path());
    with_webhook(&mut c)
        .args(["compare-baseline", "http://example.test"])
        .assert()
        .success()
        .stdout(contains("no non-baseline inspection to compare"));
}

#[test]
fn compare_without_webhook_fails_with_config_code() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["compare-baseline", "http://example.test"])
        .assert()
        .failure()
        .stderr(contains("[CONFIG_ERROR]"));
}

#[cfg(unix)]
#[test]
fn baseline_scan_records_scanner_output() {
    let dir = TempDir::new().unwrap();
    let config = format!(
        "[scanner]\ncommand = \"echo\"\nargs = [{}]\n",
        toml_string(AXE_OUTPUT)
    );
    std::fs::write(dir.path().join("sentinel.toml"), config).unwrap();

    cmd(dir.path())
        .args(["scan", "http://example.test", "--baseline"])
        .assert()
        .success()
        .stdout(contains("baseline scan recorded"))
        .stdout(contains("1 new barriers"));
}

#[cfg(unix)]
#[test]
fn scanner_failure_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("sentinel.toml"),
        "[scanner]\ncommand = \"false\"\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["scan", "http://example.test", "--baseline"])
        .assert()
        .failure()
        .stderr(contains("[SCANNER_ERROR]"));
}

#[test]
fn option_like_target_is_rejected_with_code() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["scan", "--baseline", "--", "--version"])
        .assert()
        .failure()
        .stderr(contains("[INVALID_TARGET]"));
    assert!(!dir.path().join("sentinel.db").exists());
}

fn toml_string(raw: &str) -> String {
    format!("'{raw}'")
}
