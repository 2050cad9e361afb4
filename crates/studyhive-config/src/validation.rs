// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, parseable
//! cron expressions, and sane scan intervals.

use crate::diagnostic::ConfigError;
use crate::model::StudyhiveConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StudyhiveConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty and looks like an IP or hostname
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate scan interval is non-zero and at most a day
    if config.reminders.scan_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reminders.scan_interval_secs must be greater than zero".to_string(),
        });
    } else if config.reminders.scan_interval_secs > 86_400 {
        errors.push(ConfigError::Validation {
            message: format!(
                "reminders.scan_interval_secs must be at most 86400, got {}",
                config.reminders.scan_interval_secs
            ),
        });
    }

    // Email dispatch needs an SMTP host to send through
    if config.reminders.email_enabled && config.email.smtp_host.is_none() {
        errors.push(ConfigError::Validation {
            message: "reminders.email_enabled requires email.smtp_host to be set".to_string(),
        });
    }

    // Validate cron expressions parse
    for (key, expr) in [
        ("jobs.streaks_cron", &config.jobs.streaks_cron),
        ("jobs.reports_cron", &config.jobs.reports_cron),
        ("jobs.cleanup_cron", &config.jobs.cleanup_cron),
    ] {
        if !cron_expression_is_plausible(expr) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{expr}` is not a valid 5-field cron expression"),
            });
        }
    }

    if config.jobs.cleanup_after_days == 0 {
        errors.push(ConfigError::Validation {
            message: "jobs.cleanup_after_days must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Shallow shape check for a 5-field cron expression.
///
/// The authoritative parse happens in the scheduler via croner; this check
/// exists so config errors surface at startup with the key name attached.
fn cron_expression_is_plausible(expr: &str) -> bool {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    fields.len() == 5
        && fields.iter().all(|f| {
            !f.is_empty()
                && f.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '/' | '-' | ','))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudyhiveConfig;

    #[test]
    fn default_config_validates() {
        let config = StudyhiveConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_scan_interval_is_rejected() {
        let mut config = StudyhiveConfig::default();
        config.reminders.scan_interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("scan_interval_secs")));
    }

    #[test]
    fn email_enabled_without_smtp_host_is_rejected() {
        let mut config = StudyhiveConfig::default();
        config.reminders.email_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("smtp_host")));
    }

    #[test]
    fn malformed_cron_is_rejected() {
        let mut config = StudyhiveConfig::default();
        config.jobs.streaks_cron = "not a cron".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("streaks_cron")));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = StudyhiveConfig::default();
        config.server.host = "".to_string();
        config.storage.database_path = " ".to_string();
        config.jobs.cleanup_after_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn plausible_cron_shapes() {
        assert!(cron_expression_is_plausible("0 5 * * *"));
        assert!(cron_expression_is_plausible("*/15 2,14 1-7 * 0"));
        assert!(!cron_expression_is_plausible("0 5 * *"));
        assert!(!cron_expression_is_plausible("daily"));
    }
}
