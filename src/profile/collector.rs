//! Frame statistics collection

use std::path::Path;
use std::time::Duration;

use super::report::{ProfileSnapshot, ReportError};
use crate::core::{SharedTimeSource, SystemClock, Timer};

/// Default frequency scale: frame times are in milliseconds
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Running frame time statistics over a profiling session.
///
/// Frame times are unit-agnostic; `scale` is the number of frame time units
/// per second and turns a frame time into frames per second.
#[derive(Debug)]
pub struct Profiler {
    /// Session timer, never expires
    session: Timer,
    /// Frame time units per second
    scale: f64,
    /// Frames per second derived from each non-zero frame time
    fps_samples: Vec<f64>,
    /// Sum of all frame times
    total_frame_time: f64,
    /// Frames recorded
    frame_count: u64,
    /// Shortest frame time
    min_frame_time: f64,
    /// Longest frame time
    max_frame_time: f64,
    /// Mean frame time, `total_frame_time / frame_count`
    mean_frame_time: f64,
    /// Lowest FPS sample
    min_fps: f64,
    /// Highest FPS sample
    max_fps: f64,
    /// Session closed by `end`
    finished: bool,
}

impl Profiler {
    /// Create a profiler for millisecond frame times reading the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(SystemClock::shared(), MILLIS_PER_SECOND)
    }

    /// Create a profiler with a custom frame time scale.
    ///
    /// A non-positive or non-finite scale falls back to milliseconds.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self::with_source(SystemClock::shared(), scale)
    }

    /// Create a profiler reading the given time source
    #[must_use]
    pub fn with_source(source: SharedTimeSource, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("Invalid profiler scale {scale}, using milliseconds");
            MILLIS_PER_SECOND
        };

        Self {
            session: Timer::with_source(source, 0),
            scale,
            fps_samples: Vec::new(),
            total_frame_time: 0.0,
            frame_count: 0,
            min_frame_time: 0.0,
            max_frame_time: 0.0,
            mean_frame_time: 0.0,
            min_fps: 0.0,
            max_fps: 0.0,
            finished: false,
        }
    }

    /// Start a new session, discarding previous statistics
    pub fn init(&mut self) {
        self.session.start();
        self.fps_samples.clear();
        self.total_frame_time = 0.0;
        self.frame_count = 0;
        self.min_frame_time = 0.0;
        self.max_frame_time = 0.0;
        self.mean_frame_time = 0.0;
        self.min_fps = 0.0;
        self.max_fps = 0.0;
        self.finished = false;
        log::debug!("Profiling session started");
    }

    /// Record one frame. Ignored once the session has ended.
    ///
    /// Negative or NaN frame times count as zero. A zero frame time is
    /// counted but yields no FPS sample.
    pub fn update(&mut self, frame_time: f64) {
        if self.finished {
            log::trace!("Profiler update after end ignored");
            return;
        }

        // max() also maps NaN to 0
        let frame_time = frame_time.max(0.0);

        self.frame_count += 1;
        self.total_frame_time += frame_time;

        if self.frame_count == 1 {
            self.min_frame_time = frame_time;
            self.max_frame_time = frame_time;
        } else {
            self.min_frame_time = self.min_frame_time.min(frame_time);
            self.max_frame_time = self.max_frame_time.max(frame_time);
        }
        self.mean_frame_time = self.total_frame_time / self.frame_count as f64;

        if frame_time > 0.0 {
            let fps = self.scale / frame_time;
            if self.fps_samples.is_empty() {
                self.min_fps = fps;
                self.max_fps = fps;
            } else {
                self.min_fps = self.min_fps.min(fps);
                self.max_fps = self.max_fps.max(fps);
            }
            self.fps_samples.push(fps);
        }
    }

    /// Record one frame given as a [`Duration`], converted to this
    /// profiler's unit
    pub fn record_frame(&mut self, delta: Duration) {
        self.update(delta.as_secs_f64() * self.scale);
    }

    /// Close the session. Further updates are ignored.
    pub fn end(&mut self) {
        if self.finished {
            return;
        }
        self.session.stop();
        self.finished = true;
        log::info!("Profiling session ended: {}", self.snapshot().summary());
    }

    /// Read-only view of the current statistics
    #[must_use]
    pub fn snapshot(&self) -> ProfileSnapshot {
        let mean_fps = if self.mean_frame_time > 0.0 {
            self.scale / self.mean_frame_time
        } else {
            0.0
        };

        ProfileSnapshot {
            sample_count: self.frame_count,
            mean_frame_time: self.mean_frame_time,
            min_frame_time: self.min_frame_time,
            max_frame_time: self.max_frame_time,
            mean_fps,
            min_fps: self.min_fps,
            max_fps: self.max_fps,
            fps_samples: self.fps_samples.clone(),
            session_ms: self.session.elapsed().as_nanos() as f64 / 1_000_000.0,
            finished: self.finished,
        }
    }

    /// Write the session report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::SessionOpen`] before [`end`](Self::end) was
    /// called, or an error if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        if !self.finished {
            return Err(ReportError::SessionOpen);
        }
        self.snapshot().save(path)
    }

    /// Check if the session has ended
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frames recorded this session
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time since `init`, frozen at `end`
    #[must_use]
    pub fn session_elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    /// Frame time units per second
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::sync::Arc;

    fn manual() -> (Arc<ManualClock>, Profiler) {
        let clock = Arc::new(ManualClock::millis());
        let mut profiler = Profiler::with_source(clock.clone(), MILLIS_PER_SECOND);
        profiler.init();
        (clock, profiler)
    }

    #[test]
    fn test_running_statistics() {
        let (_, mut profiler) = manual();
        for frame_time in [10.0, 20.0, 30.0] {
            profiler.update(frame_time);
        }

        let snap = profiler.snapshot();
        assert_eq!(snap.sample_count, 3);
        assert!((snap.mean_frame_time - 20.0).abs() < 1e-9);
        assert_eq!(snap.min_frame_time, 10.0);
        assert_eq!(snap.max_frame_time, 30.0);
        assert!((snap.max_fps - 100.0).abs() < 1e-9);
        assert!((snap.min_fps - 1000.0 / 30.0).abs() < 1e-9);
        assert!((snap.mean_fps - 50.0).abs() < 1e-9);
        assert_eq!(snap.fps_samples.len(), 3);
        assert!((snap.fps_samples[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_frame_time_has_no_fps_sample() {
        let (_, mut profiler) = manual();
        profiler.update(10.0);
        profiler.update(20.0);
        let before = profiler.snapshot();

        profiler.update(0.0);
        let after = profiler.snapshot();

        assert_eq!(after.sample_count, 3);
        assert_eq!(after.min_frame_time, 0.0);
        assert_eq!(after.min_fps, before.min_fps);
        assert_eq!(after.max_fps, before.max_fps);
        assert_eq!(after.fps_samples, before.fps_samples);
        assert!(after.max_fps.is_finite());
    }

    #[test]
    fn test_invalid_frame_times_are_clamped() {
        let (_, mut profiler) = manual();
        profiler.update(-5.0);
        profiler.update(f64::NAN);

        let snap = profiler.snapshot();
        assert_eq!(snap.sample_count, 2);
        assert_eq!(snap.mean_frame_time, 0.0);
        assert_eq!(snap.max_frame_time, 0.0);
        assert!(snap.fps_samples.is_empty());
        assert_eq!(snap.mean_fps, 0.0);
    }

    #[test]
    fn test_min_and_max_bracket_samples() {
        let (_, mut profiler) = manual();
        for frame_time in [16.0, 33.0, 8.0, 16.5, 40.0, 12.0] {
            profiler.update(frame_time);
            let snap = profiler.snapshot();
            assert!(snap.min_frame_time <= frame_time && frame_time <= snap.max_frame_time);
            assert!(snap.min_frame_time <= snap.mean_frame_time);
            assert!(snap.mean_frame_time <= snap.max_frame_time);
            let fps = 1000.0 / frame_time;
            assert!(snap.min_fps <= fps && fps <= snap.max_fps);
        }
    }

    #[test]
    fn test_end_freezes_snapshot() {
        let (clock, mut profiler) = manual();
        clock.advance(100);
        profiler.update(16.0);
        profiler.end();
        let frozen = profiler.snapshot();
        assert!(frozen.finished);
        assert_eq!(frozen.session_ms, 100.0);

        clock.advance(500);
        profiler.update(5.0);
        profiler.update(0.0);
        profiler.end();
        assert_eq!(profiler.snapshot(), frozen);
    }

    #[test]
    fn test_init_resets_session() {
        let (_, mut profiler) = manual();
        profiler.update(10.0);
        profiler.end();

        profiler.init();
        assert!(!profiler.is_finished());
        assert_eq!(profiler.frame_count(), 0);
        assert!(profiler.snapshot().fps_samples.is_empty());
        profiler.update(25.0);
        assert_eq!(profiler.snapshot().min_frame_time, 25.0);
    }

    #[test]
    fn test_duration_frames_and_custom_scale() {
        let clock = Arc::new(ManualClock::millis());
        let mut micros = Profiler::with_source(clock.clone(), 1_000_000.0);
        micros.init();
        micros.record_frame(Duration::from_millis(20));
        let snap = micros.snapshot();
        assert!((snap.mean_frame_time - 20_000.0).abs() < 1e-6);
        assert!((snap.max_fps - 50.0).abs() < 1e-9);

        let fallback = Profiler::with_source(clock, -1.0);
        assert_eq!(fallback.scale(), MILLIS_PER_SECOND);
    }

    #[test]
    fn test_save_requires_ended_session() {
        let (_, mut profiler) = manual();
        profiler.update(16.0);
        let path = std::env::temp_dir().join("ge_engine_profiler_open.json");
        assert!(matches!(profiler.save(&path), Err(ReportError::SessionOpen)));
    }
}
