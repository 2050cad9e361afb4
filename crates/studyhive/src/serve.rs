// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `studyhive serve` command implementation.
//!
//! Starts the full backend: SQLite storage, the WebSocket hub, the
//! reminder scanner, and the three maintenance jobs. Five independent
//! periodic/event loops total, all stopped through cancellation on ctrl-c.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use studyhive_config::StudyhiveConfig;
use studyhive_core::{Mailer, StudyStore, StudyhiveError, SystemClock};
use studyhive_email::{SmtpConfig, SmtpMailer};
use studyhive_hub::{Hub, HubConfig};
use studyhive_scheduler::{
    spawn_maintenance_jobs, ReminderDispatcher, ReminderScanner, ScheduledTask, SchedulerConfig,
};
use studyhive_storage::SqliteStore;

/// Initialize the tracing subscriber from the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the mailer if email dispatch is enabled.
///
/// Config validation already requires `smtp_host` when the flag is on; a
/// broken SMTP setup degrades to in-app-only reminders rather than
/// aborting startup.
fn build_mailer(config: &StudyhiveConfig) -> Option<Arc<dyn Mailer>> {
    if !config.reminders.email_enabled {
        return None;
    }
    let host = config.email.smtp_host.clone()?;
    let smtp = SmtpConfig {
        host,
        port: config.email.smtp_port,
        username: config.email.username.clone(),
        password: config.email.password.clone(),
        from_address: config.email.from_address.clone(),
    };
    match SmtpMailer::new(&smtp) {
        Ok(mailer) => Some(Arc::new(mailer)),
        Err(e) => {
            warn!("email dispatch disabled, mailer setup failed: {e}");
            None
        }
    }
}

/// Runs the `studyhive serve` command.
pub async fn run_serve(config: StudyhiveConfig) -> Result<(), StudyhiveError> {
    init_tracing(&config.app.log_level);
    info!(name = %config.app.name, "starting studyhive serve");

    // Storage first: everything else hangs off the store.
    let sqlite = SqliteStore::new(config.storage.clone());
    sqlite.initialize().await?;
    let sqlite = Arc::new(sqlite);
    let store: Arc<dyn StudyStore> = Arc::clone(&sqlite) as Arc<dyn StudyStore>;

    // Real-time hub.
    let hub = Hub::new(
        HubConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            bearer_token: config.server.bearer_token.clone(),
        },
        Arc::clone(&store),
    );
    if config.server.bearer_token.is_none() {
        warn!("server.bearer_token is unset -- the hub will reject all connections");
    }
    let hub_handle = hub.serve();

    // Reminder pipeline.
    let dispatcher =
        ReminderDispatcher::new(Arc::clone(&store), hub.rooms(), build_mailer(&config));
    let scanner = Arc::new(ReminderScanner::new(
        Arc::clone(&store),
        dispatcher,
        Arc::new(SystemClock),
    ));
    let scan_task = ScheduledTask::spawn_interval(
        "reminder-scan",
        Duration::from_secs(config.reminders.scan_interval_secs),
        move || {
            let scanner = Arc::clone(&scanner);
            async move { scanner.tick().await.map(|_| ()) }
        },
    );

    // Maintenance jobs.
    let scheduler_config = SchedulerConfig {
        scan_interval_secs: config.reminders.scan_interval_secs,
        streaks_cron: config.jobs.streaks_cron.clone(),
        reports_cron: config.jobs.reports_cron.clone(),
        cleanup_cron: config.jobs.cleanup_cron.clone(),
        cleanup_after_days: config.jobs.cleanup_after_days,
    };
    let mut tasks = spawn_maintenance_jobs(Arc::clone(&store), &scheduler_config)?;
    tasks.push(scan_task);

    info!(
        jobs = tasks.len(),
        "studyhive running; press ctrl-c to stop"
    );

    // Wait for shutdown signal.
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
    }

    info!("shutting down");
    for task in tasks {
        task.stop().await;
    }
    hub_handle.abort();
    sqlite.close().await?;
    info!("shutdown complete");
    Ok(())
}
