//! Startup configuration
//!
//! Read once from the environment when the binary starts:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_FIELD_WIDTH` | 10 | Board width (ignored below 4 or if not a number) |
//! | `TETRIS_STEP_MS` | 1000 | Delay between board steps |
//! | `TETRIS_PILE_FILE` | unset | Initial pile layout file |
//! | `TETRIS_SEED` | unset | RNG seed (a clock-derived seed otherwise) |
//!
//! The unprefixed `FIELD_WIDTH` and `PILE_FILE` are read when the prefixed
//! variable is unset. The board height is fixed at 22.

use std::path::PathBuf;

use crate::pile::{PileError, PileLayout};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_WIDTH, STEP_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub step_interval_ms: u32,
    pub pile_file: Option<PathBuf>,
    pub seed: Option<u32>,
}

impl GameConfig {
    /// Configuration for a `width` x `height` board with no pile
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prefixed = |name: &str, fallback: &str| lookup(name).or_else(|| lookup(fallback));

        let width = prefixed("TETRIS_FIELD_WIDTH", "FIELD_WIDTH")
            .and_then(|s| s.trim().parse::<i32>().ok())
            .filter(|&w| w >= MIN_WIDTH)
            .unwrap_or(DEFAULT_WIDTH);

        let step_interval_ms = lookup("TETRIS_STEP_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(STEP_INTERVAL_MS);

        let pile_file = prefixed("TETRIS_PILE_FILE", "PILE_FILE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(expand_home(&s)) });

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            width,
            height: DEFAULT_HEIGHT,
            step_interval_ms,
            pile_file,
            seed,
        }
    }

    /// Load the configured pile layout, if any
    pub fn load_pile(&self) -> Result<Option<PileLayout>, PileError> {
        match &self.pile_file {
            Some(path) => PileLayout::load(path, self.width, self.height).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            step_interval_ms: STEP_INTERVAL_MS,
            pile_file: None,
            seed: None,
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 22);
        assert_eq!(config.step_interval_ms, 1000);
    }

    #[test]
    fn test_width_override() {
        let config = GameConfig::from_lookup(lookup(&[("TETRIS_FIELD_WIDTH", "14")]));
        assert_eq!(config.width, 14);
        assert_eq!(config.height, 22);
    }

    #[test]
    fn test_unprefixed_names_are_fallbacks() {
        let config = GameConfig::from_lookup(lookup(&[
            ("FIELD_WIDTH", "8"),
            ("PILE_FILE", "/tmp/pile.txt"),
        ]));
        assert_eq!(config.width, 8);
        assert_eq!(config.pile_file, Some(PathBuf::from("/tmp/pile.txt")));

        let config = GameConfig::from_lookup(lookup(&[
            ("FIELD_WIDTH", "8"),
            ("TETRIS_FIELD_WIDTH", "12"),
        ]));
        assert_eq!(config.width, 12);
    }

    #[test]
    fn test_bad_width_falls_back() {
        for bad in ["abc", "3", "-10", ""] {
            let config = GameConfig::from_lookup(lookup(&[("TETRIS_FIELD_WIDTH", bad)]));
            assert_eq!(config.width, DEFAULT_WIDTH, "{:?}", bad);
        }
    }

    #[test]
    fn test_blank_pile_file_is_none() {
        let config = GameConfig::from_lookup(lookup(&[("TETRIS_PILE_FILE", "   ")]));
        assert_eq!(config.pile_file, None);
        assert!(config.load_pile().unwrap().is_none());
    }

    #[test]
    fn test_missing_pile_file_reports_error() {
        let config =
            GameConfig::from_lookup(lookup(&[("TETRIS_PILE_FILE", "/no/such/pile.txt")]));
        assert_eq!(config.pile_file, Some(PathBuf::from("/no/such/pile.txt")));
        assert!(config.load_pile().is_err());
    }

    #[test]
    fn test_seed_and_step() {
        let config = GameConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_STEP_MS", "250"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.step_interval_ms, 250);
    }
}
