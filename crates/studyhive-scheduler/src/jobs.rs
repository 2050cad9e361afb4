// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cron-driven maintenance jobs: streaks, daily reports, notification cleanup.
//!
//! Each job delegates its entire logic to the store and only logs the
//! outcome. Jobs are isolated: one failing run neither stops its own
//! schedule nor affects the others'.

use std::sync::Arc;

use chrono::{Days, Utc};
use tracing::info;

use studyhive_core::{StudyStore, StudyhiveError};

use crate::task::ScheduledTask;
use crate::SchedulerConfig;

/// Recompute all streaks. Returns the number of streak rows written.
pub async fn run_streak_update(store: &dyn StudyStore) -> Result<u64, StudyhiveError> {
    let updated = store.update_all_streaks().await?;
    info!(updated, "streak recompute complete");
    Ok(updated)
}

/// Generate daily reports for the previous UTC day (the jobs run shortly
/// after midnight, closing out the finished day). Returns reports written.
pub async fn run_report_generation(store: &dyn StudyStore) -> Result<u64, StudyhiveError> {
    let date = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| StudyhiveError::Internal("date underflow".to_string()))?;
    let written = store.generate_daily_reports(date).await?;
    info!(%date, written, "daily report generation complete");
    Ok(written)
}

/// Delete old read notifications. Returns rows deleted.
pub async fn run_notification_cleanup(
    store: &dyn StudyStore,
    older_than_days: u32,
) -> Result<u64, StudyhiveError> {
    let deleted = store.cleanup_old_notifications(older_than_days).await?;
    info!(deleted, older_than_days, "notification cleanup complete");
    Ok(deleted)
}

/// Spawn the three maintenance jobs on their configured cron schedules.
pub fn spawn_maintenance_jobs(
    store: Arc<dyn StudyStore>,
    config: &SchedulerConfig,
) -> Result<Vec<ScheduledTask>, StudyhiveError> {
    let streaks_store = Arc::clone(&store);
    let streaks = ScheduledTask::spawn_cron("streak-update", &config.streaks_cron, move || {
        let store = Arc::clone(&streaks_store);
        async move { run_streak_update(store.as_ref()).await.map(|_| ()) }
    })?;

    let reports_store = Arc::clone(&store);
    let reports = ScheduledTask::spawn_cron("report-generation", &config.reports_cron, move || {
        let store = Arc::clone(&reports_store);
        async move { run_report_generation(store.as_ref()).await.map(|_| ()) }
    })?;

    let cleanup_days = config.cleanup_after_days;
    let cleanup_store = Arc::clone(&store);
    let cleanup =
        ScheduledTask::spawn_cron("notification-cleanup", &config.cleanup_cron, move || {
            let store = Arc::clone(&cleanup_store);
            async move {
                run_notification_cleanup(store.as_ref(), cleanup_days)
                    .await
                    .map(|_| ())
            }
        })?;

    Ok(vec![streaks, reports, cleanup])
}
