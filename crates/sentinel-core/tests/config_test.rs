//! Config loading, validation, and TOML round-trips.

use sentinel_core::config::{CliOverrides, SentinelConfig};
use sentinel_core::errors::{ConfigError, SentinelErrorCode};

#[test]
fn defaults_are_sensible() {
    let config = SentinelConfig::default();
    assert_eq!(config.storage.effective_db_path().to_str(), Some("sentinel.db"));
    assert_eq!(config.gateway.effective_port(), 3000);
    assert_eq!(config.gateway.effective_rate_limit_max(), 100);
    assert_eq!(config.gateway.effective_rate_limit_window_secs(), 900);
    assert_eq!(config.scanner.effective_command(), "axe");
    assert_eq!(config.scanner.effective_args(), vec!["{target}", "--stdout"]);
}

#[test]
fn parses_all_sections() {
    let config = SentinelConfig::from_toml(
        r#"
        [storage]
        db_path = "/var/lib/sentinel/a11y.db"

        [notify]
        webhook_url = "http://localhost:3000/regression"
        auth_token = "t0k3n"

        [gateway]
        port = 8088
        workers = 4
        outbound_endpoint = "https://hooks.example.test/a11y"

        [scanner]
        command = "pa11y-axe"
        args = ["--json", "{target}"]
        timeout_secs = 30
        "#,
    )
    .unwrap();

    assert_eq!(config.storage.db_path.as_deref(), Some("/var/lib/sentinel/a11y.db"));
    assert_eq!(config.notify.require().unwrap(), ("http://localhost:3000/regression", "t0k3n"));
    assert_eq!(config.gateway.effective_port(), 8088);
    assert_eq!(config.gateway.effective_workers(), 4);
    assert_eq!(config.scanner.effective_args(), vec!["--json", "{target}"]);
    assert_eq!(config.scanner.effective_timeout_secs(), 30);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = SentinelConfig::from_toml("[gateway]\nport = 9000\nfuture_knob = true\n").unwrap();
    assert_eq!(config.gateway.port, Some(9000));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = SentinelConfig::from_toml("[gateway\nport = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn zero_port_fails_validation() {
    let config = SentinelConfig::from_toml("[gateway]\nport = 0\n").unwrap();
    let err = SentinelConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "gateway.port"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_token_fails_validation() {
    let config = SentinelConfig::from_toml("[gateway]\nauth_token = \"  \"\n").unwrap();
    assert!(SentinelConfig::validate(&config).is_err());
}

#[test]
fn notify_require_reports_missing_field() {
    let config = SentinelConfig::from_toml("[notify]\nwebhook_url = \"http://x\"\n").unwrap();
    match config.notify.require().unwrap_err() {
        ConfigError::MissingValue { field } => assert_eq!(field, "notify.auth_token"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_reads_project_file_and_cli_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sentinel.toml"),
        "[gateway]\nworkers = 3\nqueue_capacity = 7\n",
    )
    .unwrap();

    let cli = CliOverrides {
        db_path: Some("cli.db".to_string()),
        ..Default::default()
    };
    let config = SentinelConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.gateway.effective_queue_capacity(), 7);
    assert_eq!(config.storage.db_path.as_deref(), Some("cli.db"));
}

#[test]
fn toml_roundtrip_preserves_values() {
    let config = SentinelConfig::from_toml("[gateway]\nport = 4321\n").unwrap();
    let text = config.to_toml().unwrap();
    let again = SentinelConfig::from_toml(&text).unwrap();
    assert_eq!(again.gateway.port, Some(4321));
}
