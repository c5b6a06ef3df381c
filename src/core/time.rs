//! Monotonic time sources and per-frame time tracking
//!
//! Every timer in the engine reads time through a [`TimeSource`]. The
//! default [`SystemClock`] is backed by [`Instant`]; [`ManualClock`] lets a
//! host (or a test) drive time explicitly.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonic tick counter with a fixed frequency.
pub trait TimeSource: fmt::Debug + Send + Sync {
    /// Current tick count. Never decreases.
    fn now_ticks(&self) -> u64;

    /// Number of ticks per second.
    fn ticks_per_second(&self) -> u64;
}

/// Shared handle to a time source
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Convert milliseconds to ticks at the given frequency.
///
/// Negative values map to zero.
#[must_use]
pub fn ms_to_ticks(ms: i64, ticks_per_second: u64) -> u64 {
    if ms <= 0 {
        return 0;
    }
    let ticks = u128::from(ms.unsigned_abs()) * u128::from(ticks_per_second) / 1000;
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Convert ticks at the given frequency to a [`Duration`].
#[must_use]
pub fn ticks_to_duration(ticks: u64, ticks_per_second: u64) -> Duration {
    if ticks_per_second == 0 {
        return Duration::ZERO;
    }
    let nanos = u128::from(ticks) * 1_000_000_000 / u128::from(ticks_per_second);
    let secs = u64::try_from(nanos / 1_000_000_000).unwrap_or(u64::MAX);
    // remainder is always < 1e9
    Duration::new(secs, (nanos % 1_000_000_000) as u32)
}

// ============================================================================
// System Clock
// ============================================================================

/// Wall-independent clock backed by [`Instant`], counting nanoseconds.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose tick zero is now
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Create a shared handle to a new system clock
    #[must_use]
    pub fn shared() -> SharedTimeSource {
        Arc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_ticks(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn ticks_per_second(&self) -> u64 {
        1_000_000_000
    }
}

// ============================================================================
// Manual Clock
// ============================================================================

/// Explicitly driven clock.
///
/// Useful for deterministic replays and tests. Time only moves when the
/// owner calls [`advance`](Self::advance) or [`set`](Self::set).
#[derive(Debug)]
pub struct ManualClock {
    ticks: AtomicU64,
    ticks_per_second: u64,
}

impl ManualClock {
    /// Create a manual clock at tick zero.
    ///
    /// A frequency of 0 is treated as 1.
    #[must_use]
    pub fn new(ticks_per_second: u64) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            ticks_per_second: ticks_per_second.max(1),
        }
    }

    /// Manual clock ticking in milliseconds
    #[must_use]
    pub fn millis() -> Self {
        Self::new(1000)
    }

    /// Jump to an absolute tick. Earlier values are ignored.
    pub fn set(&self, ticks: u64) {
        self.ticks.fetch_max(ticks, Ordering::Relaxed);
    }

    /// Move forward by a number of ticks
    pub fn advance(&self, ticks: u64) {
        let _ = self
            .ticks
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(ticks))
            });
    }

    /// Move forward by a number of milliseconds
    pub fn advance_ms(&self, ms: i64) {
        self.advance(ms_to_ticks(ms, self.ticks_per_second));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::millis()
    }
}

impl TimeSource for ManualClock {
    fn now_ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}

// ============================================================================
// Frame Time
// ============================================================================

/// Per-frame time tracking
#[derive(Debug, Clone)]
pub struct Time {
    source: SharedTimeSource,
    /// Tick of the first update
    first: Option<u64>,
    /// Tick of the previous update
    last: u64,
    /// Time between the last two updates
    delta: Duration,
    /// Time since the first update
    elapsed: Duration,
    /// Number of updates so far
    frame_count: u64,
}

impl Time {
    /// Create a frame timer reading the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(SystemClock::shared())
    }

    /// Create a frame timer reading the given source
    #[must_use]
    pub fn with_source(source: SharedTimeSource) -> Self {
        Self {
            source,
            first: None,
            last: 0,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Sample the clock. Call once per frame.
    ///
    /// The first call yields a zero delta.
    pub fn update(&mut self) {
        let now = self.source.now_ticks();
        let freq = self.source.ticks_per_second();
        let first = *self.first.get_or_insert(now);
        if self.frame_count == 0 {
            self.last = now;
        }

        self.delta = ticks_to_duration(now.saturating_sub(self.last), freq);
        self.elapsed = ticks_to_duration(now.saturating_sub(first), freq);
        self.last = now;
        self.frame_count += 1;
    }

    /// Time since the previous frame
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the previous frame, in seconds
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time since the previous frame, in milliseconds
    #[must_use]
    pub fn delta_ms(&self) -> f64 {
        self.delta.as_secs_f64() * 1000.0
    }

    /// Time since the first frame
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of frames recorded
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The source this timer reads from
    #[must_use]
    pub fn source(&self) -> &SharedTimeSource {
        &self.source
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_conversions() {
        assert_eq!(ms_to_ticks(250, 1000), 250);
        assert_eq!(ms_to_ticks(16, 1_000_000_000), 16_000_000);
        assert_eq!(ms_to_ticks(-5, 1000), 0);
        assert_eq!(
            ticks_to_duration(1_500, 1000),
            Duration::from_millis(1_500)
        );
        assert_eq!(ticks_to_duration(10, 0), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_never_goes_backwards() {
        let clock = ManualClock::millis();
        clock.advance(40);
        clock.set(10);
        assert_eq!(clock.now_ticks(), 40);
        clock.set(100);
        clock.advance_ms(5);
        assert_eq!(clock.now_ticks(), 105);
    }

    #[test]
    fn test_frame_time_deltas() {
        let clock = Arc::new(ManualClock::millis());
        let mut time = Time::with_source(clock.clone());

        clock.advance(100);
        time.update();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.frame_count(), 1);

        clock.advance(16);
        time.update();
        assert_eq!(time.delta(), Duration::from_millis(16));
        assert!((time.delta_ms() - 16.0).abs() < 1e-9);

        clock.advance(20);
        time.update();
        assert_eq!(time.elapsed(), Duration::from_millis(36));
        assert_eq!(time.frame_count(), 3);
    }
}
