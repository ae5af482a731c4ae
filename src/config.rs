//! Session configuration.
//!
//! Defaults come from the constants in [`crate::types`]; `from_env` lets a
//! deployment override them without recompiling.

use std::env;
use std::str::FromStr;

use crate::animation::{AnimationTiming, GridLayout};

/// Everything needed to build a [`GameState`](crate::GameState)
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Seed for tile spawning
    pub seed: u64,
    pub timing: AnimationTiming,
    pub layout: GridLayout,
}

impl GameConfig {
    /// Read overrides from environment variables.
    ///
    /// - `TILE_MERGE_SEED`: spawn seed (random when unset)
    /// - `TILE_MERGE_MOVE_MS`, `TILE_MERGE_MERGE_MS`, `TILE_MERGE_SPAWN_MS`: phase durations
    /// - `TILE_MERGE_CELL_SIZE`, `TILE_MERGE_CELL_PADDING`: grid geometry in pixels
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let seed = parse_var("TILE_MERGE_SEED").unwrap_or_else(rand::random);

        let timing = AnimationTiming {
            move_secs: millis_var("TILE_MERGE_MOVE_MS").unwrap_or(defaults.timing.move_secs),
            merge_secs: millis_var("TILE_MERGE_MERGE_MS").unwrap_or(defaults.timing.merge_secs),
            spawn_secs: millis_var("TILE_MERGE_SPAWN_MS").unwrap_or(defaults.timing.spawn_secs),
            ..defaults.timing
        };

        let layout = GridLayout {
            cell_size: parse_var("TILE_MERGE_CELL_SIZE").unwrap_or(defaults.layout.cell_size),
            padding: parse_var("TILE_MERGE_CELL_PADDING").unwrap_or(defaults.layout.padding),
            ..defaults.layout
        };

        Self {
            seed,
            timing,
            layout,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            timing: AnimationTiming::default(),
            layout: GridLayout::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn millis_var(name: &str) -> Option<f32> {
    parse_var::<u32>(name).map(|ms| ms as f32 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 1);
        assert_eq!(config.timing, AnimationTiming::default());
        assert_eq!(config.layout, GridLayout::default());
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("TILE_MERGE_SEED", "77");
        std::env::set_var("TILE_MERGE_MOVE_MS", "300");
        std::env::set_var("TILE_MERGE_CELL_SIZE", "not-a-number");

        let config = GameConfig::from_env();
        assert_eq!(config.seed, 77);
        assert!((config.timing.move_secs - 0.3).abs() < 1e-6);
        assert_eq!(config.layout.cell_size, GridLayout::default().cell_size);

        std::env::remove_var("TILE_MERGE_SEED");
        std::env::remove_var("TILE_MERGE_MOVE_MS");
        std::env::remove_var("TILE_MERGE_CELL_SIZE");
    }
}
