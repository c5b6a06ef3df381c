//! Core Engine struct and main loop
//!
//! The engine owns program control flow. Each tick it samples the frame
//! clock, feeds the frame time to the profiler, advances every animation and
//! then hands control to the [`Game`].

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use winit::event::WindowEvent;

use super::config::EngineConfig;
use super::events::{EngineEvent, EventHandler, dispatch_window_event};
use super::logging;
use super::time::{SharedTimeSource, SystemClock, Time};
use crate::animation::AnimationSet;
use crate::profile::Profiler;

/// Game trait that users implement
pub trait Game: EventHandler + 'static {
    /// Called once before the first tick
    fn init(&mut self, engine: &mut EngineContext);

    /// Called every tick after animations advanced
    fn update(&mut self, engine: &mut EngineContext);

    /// Called when the engine is shutting down
    fn shutdown(&mut self, _engine: &mut EngineContext) {}
}

/// Context passed to game callbacks
pub struct EngineContext {
    /// Time tracking
    pub time: Time,
    /// Active animations
    pub animations: AnimationSet,
    /// Frame statistics
    pub profiler: Profiler,
    /// Shared clock every timer reads
    source: SharedTimeSource,
    /// Should the engine quit
    should_quit: bool,
}

impl EngineContext {
    fn new(config: &EngineConfig, source: SharedTimeSource) -> Self {
        let mut animations = AnimationSet::new();
        for (name, desc) in &config.animations {
            animations.insert_desc(name.clone(), *desc, source.clone());
        }

        Self {
            time: Time::with_source(source.clone()),
            animations,
            profiler: Profiler::with_source(source.clone(), config.fps_scale),
            source,
            should_quit: false,
        }
    }

    /// Time source for timers created by the game
    #[must_use]
    pub fn time_source(&self) -> SharedTimeSource {
        self.source.clone()
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Check if engine should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Main engine struct
pub struct Engine<G: Game> {
    config: EngineConfig,
    game: G,
    context: EngineContext,
    initialized: bool,
}

impl<G: Game> Engine<G> {
    /// Create a new engine reading the system clock
    pub fn new(config: EngineConfig, game: G) -> Self {
        Self::with_time_source(config, game, SystemClock::shared())
    }

    /// Create a new engine reading the given clock
    pub fn with_time_source(config: EngineConfig, game: G, source: SharedTimeSource) -> Self {
        let context = EngineContext::new(&config, source);
        Self {
            config,
            game,
            context,
            initialized: false,
        }
    }

    /// Start the profiling session and animations, then initialize the game.
    ///
    /// Runs at most once; `step` calls it on demand.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.context.profiler.init();
        self.context.animations.start_all();
        self.game.init(&mut self.context);
        self.initialized = true;
        log::info!("Engine initialized: {}", self.config.title);
    }

    /// Run a single tick.
    ///
    /// Returns `false` once the game requested shutdown.
    pub fn step(&mut self) -> bool {
        self.init();
        if self.context.should_quit {
            return false;
        }

        let ctx = &mut self.context;
        ctx.time.update();
        // The first tick has no previous frame to measure
        if ctx.time.frame_count() > 1 {
            ctx.profiler.record_frame(ctx.time.delta());
        }
        ctx.animations.update_all();

        self.game.update(&mut self.context);
        !self.context.should_quit
    }

    /// Forward a window event to the game.
    ///
    /// A close request also asks the engine to quit.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<EngineEvent> {
        let forwarded = dispatch_window_event(&mut self.game, event);
        if forwarded == Some(EngineEvent::CloseRequested) {
            log::info!("Close requested, shutting down");
            self.context.quit();
        }
        forwarded
    }

    /// Close the profiling session, let the game clean up and write the
    /// report if one is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written
    pub fn shutdown(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.game.shutdown(&mut self.context);
        self.context.profiler.end();

        if let Some(path) = self.config.report_path.as_deref() {
            self.save_report(path)?;
        }
        Ok(())
    }

    fn save_report(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.context.profiler.save(path)?;
        Ok(())
    }

    /// Run the engine until the game quits
    ///
    /// # Errors
    ///
    /// Returns an error if the profiling report cannot be written
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        logging::init(&self.config);
        log::info!("Starting engine: {}", self.config.title);

        let frame_duration = match self.config.target_fps {
            0 => None,
            fps => Some(Duration::from_secs_f64(1.0 / f64::from(fps))),
        };

        loop {
            let frame_start = Instant::now();
            if !self.step() {
                break;
            }

            // Maintain pacing
            if let Some(frame_duration) = frame_duration {
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }

        self.shutdown()
    }

    /// Access the context
    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    /// Access the context mutably
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.context
    }

    /// Access the game
    pub fn game(&self) -> &G {
        &self.game
    }
}
