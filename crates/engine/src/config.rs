//! Session configuration, read from the environment.

use crate::types::{Color, DEFAULT_COLOR_COUNT};

/// Default fixed timestep, one tick at 60 Hz
pub const DEFAULT_TICK_SECS: f32 = 1.0 / 60.0;

/// Default tick cap for headless runs
pub const DEFAULT_MAX_TICKS: u32 = 20_000;

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub seed: u32,
    /// Number of colors dealt, 1..=6
    pub color_count: u8,
    /// Seconds fed to the erase animation per tick
    pub tick_secs: f32,
    pub max_ticks: u32,
    /// JSON-lines event log destination
    pub log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            color_count: DEFAULT_COLOR_COUNT,
            tick_secs: DEFAULT_TICK_SECS,
            max_ticks: DEFAULT_MAX_TICKS,
            log_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything unset or unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] over an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("PUYO_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let color_count = lookup("PUYO_COLORS")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(defaults.color_count);

        let tick_secs = lookup("PUYO_TICK_SECS")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(defaults.tick_secs);

        let max_ticks = lookup("PUYO_MAX_TICKS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_ticks);

        let log_path = lookup("PUYO_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            color_count,
            tick_secs,
            max_ticks,
            log_path,
        }
        .normalized()
    }

    /// Clamp fields into their valid ranges
    pub fn normalized(mut self) -> Self {
        self.color_count = self.color_count.clamp(1, Color::ALL.len() as u8);
        self
    }
}
