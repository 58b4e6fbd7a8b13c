//! Opt-in `tracing` subscriber setup for binaries embedding the client.
//!
//! The library itself never installs a subscriber; diagnostics only reach
//! `tracing` through `app::TracingSink`.

use tracing::Level;
use tracing_subscriber::{
    Layer, Registry, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

pub const ENV_LOG_LEVEL: &str = "SFXGEN_LOG_LEVEL";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `None` keeps logging silent.
    pub level: Option<Level>,
    pub use_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            use_colors: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            config.level = parse_level(&level);
        }
        if std::env::var_os(ENV_NO_COLOR).is_some() {
            config.use_colors = false;
        }
        config
    }
}

/// Unknown values fall back to `info` so a typo still turns logging on.
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "" | "off" | "none" => None,
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => Some(Level::INFO),
    }
}

/// Installs a stderr `fmt` subscriber when a level is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let Some(level) = config.level else {
        return Ok(());
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.use_colors)
        .with_level(true)
        .with_target(true)
        .with_filter(LevelFilter::from_level(level));

    Registry::default().with(layer).try_init()?;

    tracing::debug!(level = ?level, "logging initialized");
    Ok(())
}
