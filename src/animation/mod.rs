//! 2D sprite animation module
//!
//! Timer-driven frame sequencers, named animation sets and sprite atlas
//! layout.

mod sequencer;
mod set;
mod sprite_sheet;

pub use sequencer::{Animation2D, AnimationDesc, LoopKind, SequenceState};
pub use set::AnimationSet;
pub use sprite_sheet::SpriteSheet;
