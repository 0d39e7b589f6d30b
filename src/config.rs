//! Search configuration.
//!
//! Values come from built-in defaults, optionally a TOML file, then
//! environment overrides, in that order. Every TOML key is optional.
//!
//! ```toml
//! max_duration_ms = 5000
//! max_iterations = 2000
//! exploration = 1.41
//! seed = 42
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

/// Parameters for one MCTS run and the policy it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget per move in milliseconds.
    /// Checked between iterations, so one slow iteration may overrun it.
    pub max_duration_ms: u64,

    /// Maximum select/expand/simulate/backpropagate iterations per move.
    pub max_iterations: u32,

    /// UCB1 exploration constant.
    pub exploration: f64,

    /// Seed for the policy's random choices. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Moves played per playout before it is scored as a draw.
    pub playout_max_moves: u32,

    /// Depth bound for threat searches used in node expansion.
    pub tss_max_depth: u32,

    /// Depth bound when re-checking opponent threats during critical
    /// defense selection.
    pub critical_depth: u32,

    /// Random empty squares offered when no threat or heuristic applies.
    pub random_candidates: usize,

    /// Candidate cap for the approach expansion on nearly empty boards.
    pub approach_samples: usize,

    /// Log the per-move summary at info level instead of debug.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_duration_ms: 9_500,
            max_iterations: 1_000,
            exploration: 1.41,
            seed: None,
            playout_max_moves: 10,
            tss_max_depth: 6,
            critical_depth: 4,
            random_candidates: 5,
            approach_samples: 8,
            verbose: false,
        }
    }
}

impl SearchConfig {
    /// Small, deterministic config for tests.
    pub fn for_testing() -> Self {
        Self {
            max_duration_ms: 30_000,
            max_iterations: 60,
            seed: Some(7),
            tss_max_depth: 4,
            ..Self::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.max_duration_ms = budget.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_playout_max_moves(mut self, moves: u32) -> Self {
        self.playout_max_moves = moves;
        self
    }

    pub fn with_tss_max_depth(mut self, depth: u32) -> Self {
        self.tss_max_depth = depth;
        self
    }

    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading search config");
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `GOMOKU_TIME_MS`, `GOMOKU_ITERATIONS`, `GOMOKU_EXPLORATION` and
    /// `GOMOKU_SEED` when set. Unparsable values are logged and ignored.
    pub fn with_env_overrides(mut self) -> Self {
        fn parse<T: std::str::FromStr>(key: &str) -> Option<T> {
            let raw = std::env::var(key).ok()?;
            match raw.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring unparsable override");
                    None
                }
            }
        }

        if let Some(v) = parse("GOMOKU_TIME_MS") {
            self.max_duration_ms = v;
        }
        if let Some(v) = parse("GOMOKU_ITERATIONS") {
            self.max_iterations = v;
        }
        if let Some(v) = parse("GOMOKU_EXPLORATION") {
            self.exploration = v;
        }
        if let Some(v) = parse("GOMOKU_SEED") {
            self.seed = Some(v);
        }
        self
    }

    /// Reject values the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(EngineError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(EngineError::Config(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if self.tss_max_depth == 0 || self.critical_depth == 0 {
            return Err(EngineError::Config(
                "threat search depths must be at least 1".to_string(),
            ));
        }
        if self.random_candidates == 0 || self.approach_samples == 0 {
            return Err(EngineError::Config(
                "candidate caps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_duration_ms, 9_500);
        assert_eq!(config.max_iterations, 1_000);
        assert!((config.exploration - 1.41).abs() < 1e-9);
        assert_eq!(config.playout_max_moves, 10);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = SearchConfig::for_testing();
        assert!(config.max_iterations < SearchConfig::default().max_iterations);
        assert!(config.seed.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = SearchConfig::default()
            .with_time_budget(Duration::from_millis(250))
            .with_iterations(42)
            .with_exploration(0.5)
            .with_seed(9)
            .with_playout_max_moves(20)
            .with_tss_max_depth(3);
        assert_eq!(config.time_budget(), Duration::from_millis(250));
        assert_eq!(config.max_iterations, 42);
        assert_eq!(config.exploration, 0.5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.playout_max_moves, 20);
        assert_eq!(config.tss_max_depth, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SearchConfig::from_toml_str("max_iterations = 250\nseed = 3\n").unwrap();
        assert_eq!(config.max_iterations, 250);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_duration_ms, 9_500);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SearchConfig::from_toml_str("max_iterations = \"many\""),
            Err(EngineError::Toml(_))
        ));
        assert!(matches!(
            SearchConfig::from_toml_str("max_iterations = 0"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            SearchConfig::from_toml_str("exploration = -1.0"),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SearchConfig::load(Path::new("/nonexistent/gomoku-search.toml"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = SearchConfig::for_testing();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SearchConfig::from_toml_str(&text).unwrap(), config);
    }
}
