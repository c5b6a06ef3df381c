//! Expiring stopwatch
//!
//! A [`Timer`] measures time since its last [`start`](Timer::start) and
//! optionally expires after a configured duration. Expiry can be consumed
//! with [`is_done_and_restart`](Timer::is_done_and_restart), which moves the
//! reference instant forward by whole periods so that a fixed cadence is
//! kept even when polling arrives late.
//!
//! Internally time is kept in sub-ticks (1/1000 of a source tick), so a
//! millisecond duration is represented exactly at any source frequency.

use std::time::Duration;

use super::time::{SharedTimeSource, SystemClock};

/// Sub-ticks per source tick
const SUBTICKS_PER_TICK: u128 = 1000;

/// Monotonic stopwatch with an optional expiry duration.
///
/// A duration of zero or less means the timer never expires and is only
/// useful for measuring elapsed time.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Where time is read from
    source: SharedTimeSource,
    /// Expiry threshold in milliseconds (<= 0 never expires)
    duration_ms: i64,
    /// Reference instant, in sub-ticks
    origin: u128,
    /// Elapsed sub-ticks frozen by the last `stop`
    frozen: u128,
    /// Whether the timer is measuring
    running: bool,
}

impl Timer {
    /// Create a stopped timer reading the system clock
    #[must_use]
    pub fn new(duration_ms: i64) -> Self {
        Self::with_source(SystemClock::shared(), duration_ms)
    }

    /// Create a stopped timer reading the given source
    #[must_use]
    pub fn with_source(source: SharedTimeSource, duration_ms: i64) -> Self {
        Self {
            source,
            duration_ms,
            origin: 0,
            frozen: 0,
            running: false,
        }
    }

    fn now_subticks(&self) -> u128 {
        u128::from(self.source.now_ticks()) * SUBTICKS_PER_TICK
    }

    /// Start measuring from now.
    ///
    /// Calling this on a running timer simply resets the reference instant.
    pub fn start(&mut self) {
        self.origin = self.now_subticks();
        self.frozen = 0;
        self.running = true;
    }

    /// Freeze elapsed time at the current instant
    pub fn stop(&mut self) {
        if self.running {
            self.frozen = self.now_subticks().saturating_sub(self.origin);
            self.running = false;
        }
    }

    /// Continue measuring from the frozen elapsed time
    pub fn resume(&mut self) {
        if !self.running {
            self.origin = self.now_subticks().saturating_sub(self.frozen);
            self.running = true;
        }
    }

    /// Change the expiry threshold.
    ///
    /// Elapsed time is untouched; the new value applies from the next check.
    pub fn set_duration(&mut self, duration_ms: i64) {
        self.duration_ms = duration_ms;
    }

    /// Configured expiry threshold in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Whether the timer is measuring
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Reference instant in whole source ticks, rounded down
    #[must_use]
    pub fn reference_ticks(&self) -> u64 {
        u64::try_from(self.origin / SUBTICKS_PER_TICK).unwrap_or(u64::MAX)
    }

    fn elapsed_subticks(&self) -> u128 {
        if self.running {
            self.now_subticks().saturating_sub(self.origin)
        } else {
            self.frozen
        }
    }

    /// Elapsed whole source ticks since the reference instant
    #[must_use]
    pub fn elapsed_ticks(&self) -> u64 {
        u64::try_from(self.elapsed_subticks() / SUBTICKS_PER_TICK).unwrap_or(u64::MAX)
    }

    /// Elapsed time since the reference instant
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        // sub-ticks / (1000 * freq) seconds
        let freq = u128::from(self.source.ticks_per_second().max(1));
        let nanos = self.elapsed_subticks() * 1_000_000 / freq;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Elapsed whole milliseconds since the reference instant
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        i64::try_from(self.elapsed().as_millis()).unwrap_or(i64::MAX)
    }

    /// Duration in sub-ticks, or `None` for a never-expiring timer.
    ///
    /// `duration_ms * freq` sub-ticks is exactly `duration_ms` milliseconds.
    fn period_subticks(&self) -> Option<u128> {
        if self.duration_ms <= 0 {
            return None;
        }
        let freq = u128::from(self.source.ticks_per_second());
        let period = u128::from(self.duration_ms.unsigned_abs()) * freq;
        (period > 0).then_some(period)
    }

    /// Whether the running timer has reached its duration. Does not mutate.
    #[must_use]
    pub fn is_done(&self) -> bool {
        if !self.running {
            return false;
        }
        self.period_subticks()
            .is_some_and(|period| self.elapsed_subticks() >= period)
    }

    /// Consume an expiry.
    ///
    /// Returns `true` at most once per expiry. The reference instant moves
    /// forward by whole periods, never to "now". When polled within one
    /// period of the expiry it advances by exactly one duration. A poll
    /// arriving k >= 2 periods late advances it by k durations instead of
    /// one: the missed windows are skipped and reported as a single expiry,
    /// which keeps the cadence phase without a burst of catch-up expiries.
    pub fn is_done_and_restart(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(period) = self.period_subticks() else {
            return false;
        };

        let elapsed = self.elapsed_subticks();
        if elapsed < period {
            return false;
        }

        let periods = elapsed / period;
        if periods > 1 {
            log::trace!("Timer skipped {} missed windows", periods - 1);
        }
        self.origin += periods * period;
        true
    }
}
