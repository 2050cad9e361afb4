// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduling subsystem for the Studyhive backend.
//!
//! Three pieces, wired together by the binary:
//! - [`ReminderScanner`] polls upcoming sessions on a fixed cadence and
//!   classifies time-until-start into lead-time windows.
//! - [`ReminderDispatcher`] turns a matched (session, lead) pair into a
//!   persisted notification, a best-effort email, and a room publish.
//! - [`jobs`] holds the cron-driven maintenance jobs (streaks, reports,
//!   notification cleanup), each an independent [`ScheduledTask`].

pub mod dispatch;
pub mod jobs;
pub mod lead;
pub mod scan;
pub mod task;

pub use dispatch::ReminderDispatcher;
pub use jobs::spawn_maintenance_jobs;
pub use lead::leads_for;
pub use scan::ReminderScanner;
pub use task::ScheduledTask;

/// Scheduler configuration.
///
/// Mirrors the `[reminders]` and `[jobs]` sections of `studyhive-config`
/// to avoid a dependency on the config crate from this crate.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seconds between reminder scan ticks.
    pub scan_interval_secs: u64,
    /// Daily streak recompute schedule (cron, UTC).
    pub streaks_cron: String,
    /// Daily report generation schedule (cron, UTC).
    pub reports_cron: String,
    /// Weekly notification cleanup schedule (cron, UTC).
    pub cleanup_cron: String,
    /// Cleanup deletes read notifications older than this many days.
    pub cleanup_after_days: u32,
}
