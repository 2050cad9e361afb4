// SPDX-FileCopyrightText: 2026 Studyhive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable time source for the scheduling subsystem.

use chrono::{DateTime, Utc};

/// Source of "now" for reminder window arithmetic.
///
/// Production code uses [`SystemClock`]; tests drive a manual clock so tick
/// sequences can be simulated deterministically.
pub trait Clock: Send + Sync + 'static {
    /// Current instant, UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_utc_now() {
        let clock = SystemClock;
        let before = Utc::now();
        let observed = clock.now();
        let after = Utc::now();
        assert!(before <= observed && observed <= after);
    }
}
