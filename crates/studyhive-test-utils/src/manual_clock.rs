// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manually advanced clock for simulating tick sequences.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use studyhive_core::Clock;

/// A [`Clock`] whose "now" only moves when the test says so.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock poisoned");
        *now += delta;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().expect("clock poisoned") = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_when_told() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(1));
        assert_eq!(clock.now(), start + Duration::minutes(1));

        let later = start + Duration::hours(2);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
