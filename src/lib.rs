//! A small real-time game engine core
//!
//! This engine provides:
//! - Monotonic time sources and an expiring timer with fixed-period restart
//! - Timer-driven 2D sprite animation
//! - Frame statistics profiling with saved reports
//! - A headless host loop with window event hooks

pub mod animation;
pub mod core;
pub mod profile;

// Re-exports for convenience
pub use glam;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::animation::{
        Animation2D, AnimationDesc, AnimationSet, LoopKind, SequenceState, SpriteSheet,
    };
    pub use crate::core::{
        Engine, EngineConfig, EngineContext, EventHandler, Game, ManualClock, SharedTimeSource,
        SystemClock, Time, TimeSource, Timer,
    };
    pub use crate::profile::{ProfileSnapshot, Profiler};
    pub use glam::{UVec2, Vec2, Vec4};
    pub use winit::keyboard::KeyCode;
}
