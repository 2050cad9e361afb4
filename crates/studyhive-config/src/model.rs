// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Studyhive backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Studyhive configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StudyhiveConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Real-time hub server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reminder scanning settings.
    #[serde(default)]
    pub reminders: RemindersConfig,

    /// SMTP settings for reminder email delivery.
    #[serde(default)]
    pub email: EmailConfig,

    /// Maintenance job schedules.
    #[serde(default)]
    pub jobs: JobsConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the service instance.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "studyhive".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Real-time hub server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared bearer token for WebSocket handshake auth.
    /// When unset, the hub rejects all connections (fail-closed).
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
        }
    }
}

fn default_database_path() -> String {
    "studyhive.db".to_string()
}

fn default_true() -> bool {
    true
}

/// Reminder scanner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemindersConfig {
    /// Seconds between reminder scan ticks.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Also deliver reminders by email.
    #[serde(default)]
    pub email_enabled: bool,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            email_enabled: false,
        }
    }
}

fn default_scan_interval_secs() -> u64 {
    60
}

/// SMTP configuration for reminder email delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// SMTP relay hostname.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,

    /// From address on outgoing reminders.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: default_from_address(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "reminders@studyhive.local".to_string()
}

/// Maintenance job schedules (croner cron expressions, UTC).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JobsConfig {
    /// Daily streak recompute schedule.
    #[serde(default = "default_streaks_cron")]
    pub streaks_cron: String,

    /// Daily report generation schedule.
    #[serde(default = "default_reports_cron")]
    pub reports_cron: String,

    /// Weekly notification cleanup schedule.
    #[serde(default = "default_cleanup_cron")]
    pub cleanup_cron: String,

    /// Read notifications older than this many days are deleted by cleanup.
    #[serde(default = "default_cleanup_after_days")]
    pub cleanup_after_days: u32,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            streaks_cron: default_streaks_cron(),
            reports_cron: default_reports_cron(),
            cleanup_cron: default_cleanup_cron(),
            cleanup_after_days: default_cleanup_after_days(),
        }
    }
}

fn default_streaks_cron() -> String {
    "0 5 * * *".to_string()
}

fn default_reports_cron() -> String {
    "30 5 * * *".to_string()
}

fn default_cleanup_cron() -> String {
    "0 6 * * 0".to_string()
}

fn default_cleanup_after_days() -> u32 {
    30
}
