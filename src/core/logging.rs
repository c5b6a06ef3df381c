//! Logger setup
//!
//! Components log through the `log` facade. The concrete sink is installed
//! once at startup from the engine configuration.

use log::LevelFilter;

use super::config::EngineConfig;

/// Parse a level name, falling back to `Info` for unknown names
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the `env_logger` sink with the configured level.
///
/// `RUST_LOG` still overrides the configured level. Calling this more than
/// once keeps the first logger.
pub fn init(config: &EngineConfig) {
    let level = parse_level(&config.log_level);
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized at level {level} for {}", config.title);
    }
}
