//! Start-up configuration from environment variables.
//!
//! - `RAIL_PUZZLE_LEVELS`: JSON level pack to play (default: built-in levels)
//! - `RAIL_PUZZLE_START_LEVEL`: 1-based level to begin at (default: 1)
//! - `RAIL_PUZZLE_SEED`: seed for the train line choice (default: clock)
//! - `RAIL_PUZZLE_LOG_PATH`: log file; logging is off when unset because the
//!   terminal belongs to the game
//! - `RAIL_PUZZLE_LOG`: `tracing` filter directive (default: "info")
//!
//! Unparseable values fall back to their defaults.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::core::{LevelPack, PuzzleSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub levels_path: Option<PathBuf>,
    /// 0-based.
    pub start_level: usize,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            levels_path: None,
            start_level: 0,
            seed: None,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl PuzzleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();
        Self {
            levels_path: non_empty("RAIL_PUZZLE_LEVELS").map(PathBuf::from),
            start_level: non_empty("RAIL_PUZZLE_START_LEVEL")
                .and_then(|s| s.parse::<usize>().ok())
                .map(|n| n.saturating_sub(1))
                .unwrap_or(defaults.start_level),
            seed: non_empty("RAIL_PUZZLE_SEED").and_then(|s| s.parse().ok()),
            log_path: non_empty("RAIL_PUZZLE_LOG_PATH").map(PathBuf::from),
            log_filter: non_empty("RAIL_PUZZLE_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Configured seed, or one derived from the clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }

    /// The level pack to play.
    pub fn load_levels(&self) -> Result<LevelPack> {
        match &self.levels_path {
            Some(path) => LevelPack::load(path)
                .with_context(|| format!("loading levels from {}", path.display())),
            None => Ok(LevelPack::builtin()),
        }
    }

    /// A fresh session per this configuration, still in `Setup`.
    pub fn build_session(&self) -> Result<PuzzleSession> {
        let pack = self.load_levels()?;
        Ok(PuzzleSession::new(pack.levels, self.seed_or_clock()).with_start_level(self.start_level))
    }

    /// Install the global `tracing` subscriber when a log file is configured.
    ///
    /// Returns whether logging is active.
    pub fn init_logging(&self) -> Result<bool> {
        let Some(path) = &self.log_path else {
            return Ok(false);
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        let filter = EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;
        Ok(true)
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PuzzleConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PuzzleConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = PuzzleConfig::from_lookup(lookup(&[
            ("RAIL_PUZZLE_LEVELS", "levels.json"),
            ("RAIL_PUZZLE_START_LEVEL", "3"),
            ("RAIL_PUZZLE_SEED", "99"),
            ("RAIL_PUZZLE_LOG_PATH", "/tmp/rail.log"),
            ("RAIL_PUZZLE_LOG", "debug"),
        ]));
        assert_eq!(config.levels_path, Some(PathBuf::from("levels.json")));
        assert_eq!(config.start_level, 2);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/rail.log")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = PuzzleConfig::from_lookup(lookup(&[
            ("RAIL_PUZZLE_START_LEVEL", "first"),
            ("RAIL_PUZZLE_SEED", "-4"),
            ("RAIL_PUZZLE_LOG_PATH", "   "),
        ]));
        assert_eq!(config.start_level, 0);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn builtin_session_honours_start_level() {
        let config = PuzzleConfig {
            start_level: 1,
            seed: Some(5),
            ..PuzzleConfig::default()
        };
        let session = config.build_session().unwrap();
        assert_eq!(session.level_number(), 2);
    }

    #[test]
    fn logging_stays_off_without_path() {
        assert!(!PuzzleConfig::default().init_logging().unwrap());
    }
}
