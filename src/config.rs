use std::path::PathBuf;

use crate::ghost::DEFAULT_REROLL_CHANCE;

pub const DEFAULT_TICK_MS: u64 = 125;
pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Runtime knobs, read from `PACMAN_*` environment variables. Missing or
/// unparsable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub reroll_chance: f64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            reroll_chance: DEFAULT_REROLL_CHANCE,
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let tick_ms = lookup("PACMAN_TICK_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.tick_ms);
        let render_fps = lookup("PACMAN_FPS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.render_fps);
        let reroll_chance = lookup("PACMAN_GHOST_JITTER")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| (0.0..=1.0).contains(v))
            .unwrap_or(defaults.reroll_chance);
        let seed = lookup("PACMAN_SEED").and_then(|v| v.trim().parse::<u64>().ok());
        let log_file = lookup("PACMAN_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Settings {
            tick_ms,
            render_fps,
            reroll_chance,
            seed,
            log_file,
        }
    }
}
