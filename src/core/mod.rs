//! Core engine module
//!
//! Contains the time sources, the expiring timer, configuration, logging
//! setup, window event handling and the main Engine struct.

mod config;
mod engine;
mod events;
pub mod logging;
mod time;
mod timer;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineContext, Game};
pub use events::{EngineEvent, EventHandler, dispatch, dispatch_window_event};
pub use time::{
    ManualClock, SharedTimeSource, SystemClock, Time, TimeSource, ms_to_ticks, ticks_to_duration,
};
pub use timer::Timer;
