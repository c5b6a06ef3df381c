//! Frame-based sprite animation
//!
//! An [`Animation2D`] advances a discrete frame index each time its timer
//! expires. Calling [`Animation2D::update`] more often than the frame
//! duration is harmless; the frame only changes on expiry, so playback speed
//! does not depend on the render frame rate.

use serde::{Deserialize, Serialize};

use crate::core::{SharedTimeSource, SystemClock, Timer};

/// What happens after the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopKind {
    /// Wrap back to the start frame
    #[default]
    Continuous,
    /// Hold the last frame and finish
    Finite,
}

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Not started yet
    #[default]
    Idle,
    /// Playing, showing `frame`
    Playing {
        /// Current frame index
        frame: u32,
    },
    /// A finite animation ran past its last frame
    Finished,
}

/// Serializable description of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDesc {
    /// Loop behavior
    pub loop_kind: LoopKind,
    /// First frame of the sequence
    pub start_frame: u32,
    /// Number of frames in the strip
    pub total_frames: u32,
    /// How long each frame is shown, in milliseconds
    pub frame_duration_ms: i64,
}

impl AnimationDesc {
    /// Describe a looping animation starting at frame 0
    #[must_use]
    pub const fn looping(total_frames: u32, frame_duration_ms: i64) -> Self {
        Self {
            loop_kind: LoopKind::Continuous,
            start_frame: 0,
            total_frames,
            frame_duration_ms,
        }
    }

    /// Describe a one-shot animation starting at frame 0
    #[must_use]
    pub const fn once(total_frames: u32, frame_duration_ms: i64) -> Self {
        Self {
            loop_kind: LoopKind::Finite,
            start_frame: 0,
            total_frames,
            frame_duration_ms,
        }
    }

    /// Set the start frame
    #[must_use]
    pub const fn with_start_frame(mut self, start_frame: u32) -> Self {
        self.start_frame = start_frame;
        self
    }
}

/// Timer-driven frame sequencer
#[derive(Debug, Clone)]
pub struct Animation2D {
    /// Loop behavior
    loop_kind: LoopKind,
    /// Frame `start` resets to and continuous loops wrap to
    start_frame: u32,
    /// Number of frames, at least 1
    total_frames: u32,
    /// Expires once per frame duration
    timer: Timer,
    /// Current state
    state: SequenceState,
}

impl Animation2D {
    /// Create an idle animation reading the system clock
    #[must_use]
    pub fn new(desc: AnimationDesc) -> Self {
        Self::with_source(desc, SystemClock::shared())
    }

    /// Create an idle animation reading the given time source
    #[must_use]
    pub fn with_source(desc: AnimationDesc, source: SharedTimeSource) -> Self {
        let total_frames = if desc.total_frames == 0 {
            log::warn!("Animation with zero frames, treating as a single frame");
            1
        } else {
            desc.total_frames
        };

        let start_frame = if desc.start_frame >= total_frames {
            log::warn!(
                "Start frame {} out of range for {} frames, clamping",
                desc.start_frame,
                total_frames
            );
            total_frames - 1
        } else {
            desc.start_frame
        };

        Self {
            loop_kind: desc.loop_kind,
            start_frame,
            total_frames,
            timer: Timer::with_source(source, desc.frame_duration_ms),
            state: SequenceState::Idle,
        }
    }

    /// Start (or restart) playback from the start frame
    pub fn start(&mut self) {
        self.timer.start();
        self.state = SequenceState::Playing {
            frame: self.start_frame,
        };
    }

    /// Advance on timer expiry. Call once per tick.
    ///
    /// Returns `true` if the visible frame changed.
    pub fn update(&mut self) -> bool {
        let SequenceState::Playing { frame } = self.state else {
            return false;
        };
        if !self.timer.is_done_and_restart() {
            return false;
        }

        let next = frame + 1;
        if next < self.total_frames {
            self.state = SequenceState::Playing { frame: next };
            return true;
        }

        match self.loop_kind {
            LoopKind::Continuous => {
                self.state = SequenceState::Playing {
                    frame: self.start_frame,
                };
                frame != self.start_frame
            }
            LoopKind::Finite => {
                self.timer.stop();
                self.state = SequenceState::Finished;
                false
            }
        }
    }

    /// Frame to display.
    ///
    /// A finished animation holds its last frame; an idle one shows the
    /// start frame.
    #[must_use]
    pub const fn current_frame(&self) -> u32 {
        match self.state {
            SequenceState::Idle => self.start_frame,
            SequenceState::Playing { frame } => frame,
            SequenceState::Finished => self.total_frames - 1,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SequenceState {
        self.state
    }

    /// Check if playing
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, SequenceState::Playing { .. })
    }

    /// Check if a finite animation has completed
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, SequenceState::Finished)
    }

    /// Change how long each frame is shown
    pub fn set_frame_duration(&mut self, frame_duration_ms: i64) {
        self.timer.set_duration(frame_duration_ms);
    }

    /// How long each frame is shown, in milliseconds
    #[must_use]
    pub const fn frame_duration_ms(&self) -> i64 {
        self.timer.duration_ms()
    }

    /// Loop behavior
    #[must_use]
    pub const fn loop_kind(&self) -> LoopKind {
        self.loop_kind
    }

    /// First frame of the sequence
    #[must_use]
    pub const fn start_frame(&self) -> u32 {
        self.start_frame
    }

    /// Number of frames
    #[must_use]
    pub const fn total_frames(&self) -> u32 {
        self.total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::sync::Arc;

    fn manual(desc: AnimationDesc) -> (Arc<ManualClock>, Animation2D) {
        let clock = Arc::new(ManualClock::millis());
        let anim = Animation2D::with_source(desc, clock.clone());
        (clock, anim)
    }

    #[test]
    fn test_continuous_cycles() {
        let (clock, mut anim) = manual(AnimationDesc::looping(4, 100));
        anim.start();
        assert_eq!(anim.current_frame(), 0);

        let mut seen = Vec::new();
        for _ in 0..12 {
            // Several render ticks per animation frame
            for _ in 0..4 {
                clock.advance(25);
                anim.update();
            }
            seen.push(anim.current_frame());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert!(anim.is_playing());
    }

    #[test]
    fn test_continuous_wraps_to_start_frame() {
        let desc = AnimationDesc::looping(5, 10).with_start_frame(3);
        let (clock, mut anim) = manual(desc);
        anim.start();

        let mut seen = Vec::new();
        for _ in 0..5 {
            clock.advance(10);
            anim.update();
            seen.push(anim.current_frame());
        }
        assert_eq!(seen, vec![4, 3, 4, 3, 4]);
    }

    #[test]
    fn test_finite_holds_last_frame() {
        let (clock, mut anim) = manual(AnimationDesc::once(3, 50));
        anim.start();

        clock.advance(50);
        assert!(anim.update());
        clock.advance(50);
        assert!(anim.update());
        assert_eq!(anim.current_frame(), 2);
        assert!(anim.is_playing());

        clock.advance(50);
        assert!(!anim.update());
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), 2);

        for _ in 0..10 {
            clock.advance(50);
            assert!(!anim.update());
            assert_eq!(anim.current_frame(), 2);
            assert_eq!(anim.state(), SequenceState::Finished);
        }

        anim.start();
        assert_eq!(anim.state(), SequenceState::Playing { frame: 0 });
    }

    #[test]
    fn test_update_without_expiry_keeps_frame() {
        let (clock, mut anim) = manual(AnimationDesc::looping(4, 100));
        anim.start();
        for _ in 0..99 {
            clock.advance(1);
            assert!(!anim.update());
        }
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_idle_does_not_advance() {
        let (clock, mut anim) = manual(AnimationDesc::looping(4, 10).with_start_frame(2));
        assert_eq!(anim.state(), SequenceState::Idle);
        clock.advance(1_000);
        assert!(!anim.update());
        assert_eq!(anim.current_frame(), 2);
    }

    #[test]
    fn test_double_start_matches_single_start() {
        let (clock, mut once) = manual(AnimationDesc::looping(4, 100));
        let mut twice = Animation2D::with_source(AnimationDesc::looping(4, 100), clock.clone());

        clock.advance(250);
        once.start();
        twice.start();
        twice.start();
        assert_eq!(once.state(), twice.state());
        assert_eq!(twice.current_frame(), 0);

        clock.advance(100);
        once.update();
        twice.update();
        assert_eq!(once.current_frame(), twice.current_frame());
        assert_eq!(twice.current_frame(), 1);
    }

    #[test]
    fn test_degenerate_configurations() {
        let (clock, mut empty) = manual(AnimationDesc::once(0, 10));
        assert_eq!(empty.total_frames(), 1);
        empty.start();
        clock.advance(10);
        empty.update();
        assert!(empty.is_finished());
        assert_eq!(empty.current_frame(), 0);

        let (_, clamped) = manual(AnimationDesc::looping(3, 10).with_start_frame(7));
        assert_eq!(clamped.start_frame(), 2);

        let (clock, mut frozen) = manual(AnimationDesc::looping(3, 0));
        frozen.start();
        clock.advance(10_000);
        assert!(!frozen.update());
        assert_eq!(frozen.current_frame(), 0);
    }
}
