// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maintenance queries: streak recomputation and daily report generation.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use rusqlite::params;
use studyhive_core::StudyhiveError;

use crate::database::{map_tr_err, Database};

/// Recompute every user's streak from completed session history.
///
/// A streak counts consecutive calendar days (UTC) with at least one
/// completed session. The current streak must reach `today` or yesterday;
/// an older run only contributes to `longest_days`. Returns the number of
/// streak rows written.
pub async fn update_all_streaks(db: &Database, today: NaiveDate) -> Result<u64, StudyhiveError> {
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let mut by_user: BTreeMap<i64, Vec<NaiveDate>> = BTreeMap::new();
            {
                let mut stmt = conn.prepare(
                    "SELECT DISTINCT user_id, date(scheduled_start)
                     FROM study_sessions WHERE status = 'completed'
                     ORDER BY user_id ASC, date(scheduled_start) DESC",
                )?;
                let rows = stmt.query_map([], |row| {
                    let user_id: i64 = row.get(0)?;
                    let date: String = row.get(1)?;
                    Ok((user_id, date))
                })?;
                for row in rows {
                    let (user_id, date) = row?;
                    if let Ok(parsed) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                        by_user.entry(user_id).or_default().push(parsed);
                    }
                }
            }

            let tx = conn.transaction()?;
            let mut written = 0u64;
            for (user_id, dates) in &by_user {
                let (current, longest) = streak_from_dates(dates, today);
                let last_study = dates.first().map(|d| d.to_string());
                tx.execute(
                    "INSERT INTO streaks (user_id, current_days, longest_days, last_study_date, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(user_id) DO UPDATE SET
                         current_days = excluded.current_days,
                         longest_days = excluded.longest_days,
                         last_study_date = excluded.last_study_date,
                         updated_at = excluded.updated_at",
                    params![user_id, current, longest, last_study, now],
                )?;
                written += 1;
            }
            tx.commit()?;
            Ok(written)
        })
        .await
        .map_err(map_tr_err)
}

/// Compute (current, longest) streaks from study dates sorted newest first.
fn streak_from_dates(dates: &[NaiveDate], today: NaiveDate) -> (i64, i64) {
    if dates.is_empty() {
        return (0, 0);
    }

    // Current streak: run of consecutive days ending at today or yesterday.
    let mut current = 0i64;
    if today - dates[0] <= Duration::days(1) {
        current = 1;
        for pair in dates.windows(2) {
            if pair[0] - pair[1] == Duration::days(1) {
                current += 1;
            } else {
                break;
            }
        }
    }

    // Longest streak: maximum consecutive run anywhere in history.
    let mut longest = 1i64;
    let mut run = 1i64;
    for pair in dates.windows(2) {
        if pair[0] - pair[1] == Duration::days(1) {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    (current, longest.max(current))
}

/// Generate per-user daily reports for `date`. Re-running for the same date
/// replaces the existing rows. Returns the number of reports written.
pub async fn generate_daily_reports(
    db: &Database,
    date: NaiveDate,
) -> Result<u64, StudyhiveError> {
    let date = date.to_string();
    let now = Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let written = conn.execute(
                "INSERT OR REPLACE INTO daily_reports
                     (user_id, report_date, sessions_completed, minutes_studied, created_at)
                 SELECT user_id, ?1, COUNT(*), COALESCE(SUM(duration_minutes), 0), ?2
                 FROM study_sessions
                 WHERE status = 'completed' AND date(scheduled_start) = ?1
                 GROUP BY user_id",
                params![date, now],
            )?;
            Ok(written as u64)
        })
        .await
        .map_err(map_tr_err)
}
