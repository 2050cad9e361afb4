// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Studyhive configuration system.

use studyhive_config::diagnostic::suggest_key;
use studyhive_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_studyhive_config() {
    let toml = r#"
[app]
name = "test-hive"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9100
bearer_token = "hive-secret"

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[reminders]
scan_interval_secs = 30
email_enabled = true

[email]
smtp_host = "smtp.example.com"
smtp_port = 2525
username = "mailer"
password = "hunter2"
from_address = "noreply@example.com"

[jobs]
streaks_cron = "15 4 * * *"
reports_cron = "45 4 * * *"
cleanup_cron = "0 7 * * 6"
cleanup_after_days = 14
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "test-hive");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.bearer_token.as_deref(), Some("hive-secret"));
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.reminders.scan_interval_secs, 30);
    assert!(config.reminders.email_enabled);
    assert_eq!(config.email.smtp_host.as_deref(), Some("smtp.example.com"));
    assert_eq!(config.email.smtp_port, 2525);
    assert_eq!(config.jobs.streaks_cron, "15 4 * * *");
    assert_eq!(config.jobs.cleanup_after_days, 14);
}

/// Unknown field in [server] section produces an error mentioning the key.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 9000
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "studyhive");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8090);
    assert!(config.server.bearer_token.is_none());
    assert_eq!(config.storage.database_path, "studyhive.db");
    assert!(config.storage.wal_mode);
    assert_eq!(config.reminders.scan_interval_secs, 60);
    assert!(!config.reminders.email_enabled);
    assert_eq!(config.jobs.streaks_cron, "0 5 * * *");
    assert_eq!(config.jobs.cleanup_cron, "0 6 * * 0");
}

/// Environment variables with the section prefix override TOML values.
#[test]
fn env_var_overrides_server_port() {
    use figment::{
        providers::{Env, Format, Serialized, Toml},
        Figment,
    };
    use studyhive_config::StudyhiveConfig;

    // A test-unique prefix keeps this isolated from parallel tests and the
    // real STUDYHIVE_ environment.
    unsafe { std::env::set_var("STUDYHIVE_TEST_SERVER_PORT", "9999") };

    let config: StudyhiveConfig = Figment::new()
        .merge(Serialized::defaults(StudyhiveConfig::default()))
        .merge(Toml::string("[server]\nport = 8090\n"))
        .merge(
            Env::prefixed("STUDYHIVE_TEST_")
                .map(|key| key.as_str().replacen("server_", "server.", 1).into()),
        )
        .extract()
        .expect("config should extract");

    unsafe { std::env::remove_var("STUDYHIVE_TEST_SERVER_PORT") };
    assert_eq!(config.server.port, 9999);
}

/// Validation failures surface through load_and_validate_str.
#[test]
fn validation_rejects_email_without_smtp_host() {
    let toml = r#"
[reminders]
email_enabled = true
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(|e| e.to_string().contains("smtp_host")));
}

/// The typo suggester proposes close key names.
#[test]
fn suggest_key_for_near_miss() {
    let valid = &["scan_interval_secs", "email_enabled"];
    assert_eq!(
        suggest_key("scan_intervl_secs", valid),
        Some("scan_interval_secs".to_string())
    );
}

/// Wrong value types are rejected by figment extraction.
#[test]
fn wrong_type_for_port_is_rejected() {
    let toml = r#"
[server]
port = "not-a-number"
"#;

    assert!(load_config_from_str(toml).is_err());
}
