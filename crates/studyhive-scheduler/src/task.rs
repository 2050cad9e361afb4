// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduled task lifecycle: owned periodic jobs with explicit start/stop.
//!
//! Every periodic job in the system is a [`ScheduledTask`]: a named tokio
//! task driven either by a fixed interval or a cron expression, stopped
//! through a cancellation token. No job is a bare process-wide timer.

use std::future::Future;
use std::time::Duration;

use croner::Cron;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use studyhive_core::StudyhiveError;

/// A named periodic job with an explicit stop.
pub struct ScheduledTask {
    name: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Spawn a job that runs `tick` every `period`.
    ///
    /// Uses `MissedTickBehavior::Delay`: a tick that overruns delays the
    /// next one instead of letting executions interleave. A failing tick is
    /// logged; the next tick proceeds independently.
    pub fn spawn_interval<F, Fut>(name: &str, period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), StudyhiveError>> + Send,
    {
        let token = CancellationToken::new();
        let child_token = token.clone();
        let job_name = name.to_string();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = child_token.cancelled() => break,
                    _ = interval.tick() => {
                        if let Err(e) = tick().await {
                            error!(job = %job_name, "tick failed: {e}");
                        }
                    }
                }
            }
            debug!(job = %job_name, "scheduled task stopped");
        });

        Self {
            name: name.to_string(),
            token,
            handle,
        }
    }

    /// Spawn a job that runs `tick` on a 5-field cron schedule (UTC).
    ///
    /// The expression is parsed up front so a bad schedule fails at spawn
    /// time, not at the first would-be occurrence.
    pub fn spawn_cron<F, Fut>(name: &str, expr: &str, tick: F) -> Result<Self, StudyhiveError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), StudyhiveError>> + Send,
    {
        let cron: Cron = expr.parse().map_err(|e| {
            StudyhiveError::Config(format!("invalid cron expression `{expr}`: {e}"))
        })?;

        let token = CancellationToken::new();
        let child_token = token.clone();
        let job_name = name.to_string();

        let handle = tokio::spawn(async move {
            loop {
                let now = chrono::Utc::now();
                let next = match cron.find_next_occurrence(&now, false) {
                    Ok(next) => next,
                    Err(e) => {
                        error!(job = %job_name, "no next cron occurrence: {e}");
                        break;
                    }
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                debug!(job = %job_name, next = %next, "sleeping until next occurrence");

                tokio::select! {
                    _ = child_token.cancelled() => break,
                    _ = tokio::time::sleep(wait) => {
                        if let Err(e) = tick().await {
                            error!(job = %job_name, "run failed: {e}");
                        }
                    }
                }
            }
            debug!(job = %job_name, "scheduled task stopped");
        });

        Ok(Self {
            name: name.to_string(),
            token,
            handle,
        })
    }

    /// The job's name, for logs and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cancel the job and wait for its task to wind down.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}
