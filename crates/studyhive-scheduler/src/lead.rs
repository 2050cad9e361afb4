// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead-time window classification.
//!
//! Each reminder lead matches a half-open window `(upper - width, upper]`
//! of time-until-start. Window widths assume the default one-minute scan
//! cadence (the 1-day window is wider to absorb scan jitter over a long
//! horizon); the reminder log in the store makes firing exact regardless,
//! so a different cadence degrades to missed windows, never to duplicates.

use chrono::Duration;

use studyhive_core::types::ReminderLead;

/// (lead, window upper bound, window width), all in minutes.
const WINDOWS: [(ReminderLead, i64, i64); 3] = [
    (ReminderLead::FifteenMinutes, 15, 1),
    (ReminderLead::OneHour, 60, 1),
    (ReminderLead::OneDay, 1440, 6),
];

/// Leads whose window contains `delta`, the time until session start.
///
/// The windows are disjoint, so at most one lead matches today; the return
/// type stays a list because each window is checked independently and a
/// session legitimately passes through all three over its lifetime.
pub fn leads_for(delta: Duration) -> Vec<ReminderLead> {
    let ms = delta.num_milliseconds();
    WINDOWS
        .iter()
        .filter(|(_, upper, width)| {
            let upper_ms = upper * 60_000;
            let lower_ms = (upper - width) * 60_000;
            ms > lower_ms && ms <= upper_ms
        })
        .map(|(lead, _, _)| *lead)
        .collect()
}
