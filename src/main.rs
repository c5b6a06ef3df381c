//! Headless demo: two sprite animations driven for a few seconds

use ge_engine::prelude::*;

/// How long the demo runs
const RUN_TIME_MS: i64 = 3_000;

/// Demo game logging sprite frame changes
struct DemoGame {
    sheet: SpriteSheet,
    run_timer: Option<Timer>,
    last_walk_frame: Option<u32>,
}

impl DemoGame {
    fn new() -> Self {
        Self {
            sheet: SpriteSheet::new(4, 2, 32, 32),
            run_timer: None,
            last_walk_frame: None,
        }
    }
}

impl EventHandler for DemoGame {
    fn on_key(&mut self, key: KeyCode, pressed: bool) {
        log::debug!("Key {key:?} pressed: {pressed}");
    }
}

impl Game for DemoGame {
    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("Initializing demo game");

        let mut timer = Timer::with_source(ctx.time_source(), RUN_TIME_MS);
        timer.start();
        self.run_timer = Some(timer);
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        if let Some(frame) = ctx.animations.current_frame("walk")
            && self.last_walk_frame != Some(frame)
        {
            let uv = self.sheet.uv_rect(frame);
            log::debug!("walk frame {frame} -> uv {uv}");
            self.last_walk_frame = Some(frame);
        }

        if self.run_timer.as_ref().is_some_and(Timer::is_done) {
            ctx.quit();
        }
    }

    fn shutdown(&mut self, ctx: &mut EngineContext) {
        let spark = ctx.animations.get("spark");
        log::info!(
            "Demo finished after {} frames, spark finished: {}",
            ctx.time.frame_count(),
            spark.is_some_and(Animation2D::is_finished)
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_ron(path)?,
        None => EngineConfig::default()
            .with_title("Sprite Demo")
            .with_target_fps(60)
            .with_animation("walk", AnimationDesc::looping(8, 100))
            .with_animation("spark", AnimationDesc::once(6, 50)),
    };

    let engine = Engine::new(config, DemoGame::new());
    engine.run()
}
