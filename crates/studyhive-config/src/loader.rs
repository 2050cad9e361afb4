// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./studyhive.toml` > `~/.config/studyhive/studyhive.toml`
//! > `/etc/studyhive/studyhive.toml` with environment variable overrides via
//! `STUDYHIVE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::StudyhiveConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/studyhive/studyhive.toml` (system-wide)
/// 3. `~/.config/studyhive/studyhive.toml` (user XDG config)
/// 4. `./studyhive.toml` (local directory)
/// 5. `STUDYHIVE_*` environment variables
pub fn load_config() -> Result<StudyhiveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyhiveConfig::default()))
        .merge(Toml::file("/etc/studyhive/studyhive.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("studyhive/studyhive.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("studyhive.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<StudyhiveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyhiveConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StudyhiveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyhiveConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `STUDYHIVE_STORAGE_DATABASE_PATH`
/// must map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("STUDYHIVE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: STUDYHIVE_SERVER_BEARER_TOKEN -> "server_bearer_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("reminders_", "reminders.", 1)
            .replacen("email_", "email.", 1)
            .replacen("jobs_", "jobs.", 1);
        mapped.into()
    })
}
