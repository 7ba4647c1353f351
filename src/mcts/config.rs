//! Search configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default UCT exploration constant, `sqrt(2)`
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Consecutive path-signature collisions tolerated at a single rollout step
pub const DEFAULT_RETRY_LIMIT: usize = 100;

/// Value assigned to a node whose rollout ran into a forced loss
pub const DEFAULT_FORCED_LOSS_PENALTY: f64 = -100.0;

/// Configuration for a search run.
///
/// # Examples
///
/// ```
/// use noughts_mcts::mcts::SearchConfig;
///
/// let config = SearchConfig::new(500)
///     .with_seed(42)
///     .with_rollouts_per_leaf(50);
/// assert_eq!(config.rollouts(), 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of select/expand/simulate/backpropagate iterations
    pub iterations: usize,
    /// Exploration weight `C` in the UCT score
    pub exploration: f64,
    /// Rollouts run from each simulated node; `None` reuses `iterations`
    pub rollouts_per_leaf: Option<usize>,
    /// Collision retries allowed per rollout step before giving up
    pub retry_limit: usize,
    /// Value a node is reset to after a forced-loss rollout
    pub forced_loss_penalty: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Create a configuration running `iterations` iterations with default
    /// values for everything else.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            exploration: DEFAULT_EXPLORATION,
            rollouts_per_leaf: None,
            retry_limit: DEFAULT_RETRY_LIMIT,
            forced_loss_penalty: DEFAULT_FORCED_LOSS_PENALTY,
            seed: None,
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the UCT exploration weight.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Cap the number of rollouts run per simulated node.
    pub fn with_rollouts_per_leaf(mut self, rollouts: usize) -> Self {
        self.rollouts_per_leaf = Some(rollouts);
        self
    }

    pub fn with_retry_limit(mut self, retry_limit: usize) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    pub fn with_forced_loss_penalty(mut self, penalty: f64) -> Self {
        self.forced_loss_penalty = penalty;
        self
    }

    /// Rollouts actually run per simulated node
    pub fn rollouts(&self) -> usize {
        self.rollouts_per_leaf.unwrap_or(self.iterations)
    }

    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.iterations == 0 {
            return invalid("iterations must be at least 1".to_string());
        }
        // Node visit counts are u32
        if u32::try_from(self.iterations).is_err() {
            return invalid(format!(
                "iterations {} exceed the maximum of {}",
                self.iterations,
                u32::MAX
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return invalid(format!(
                "exploration weight {} must be finite and non-negative",
                self.exploration
            ));
        }
        if self.rollouts_per_leaf == Some(0) {
            return invalid("rollouts per leaf must be at least 1".to_string());
        }
        if self.retry_limit == 0 {
            return invalid("retry limit must be at least 1".to_string());
        }
        if !self.forced_loss_penalty.is_finite() {
            return invalid(format!(
                "forced-loss penalty {} must be finite",
                self.forced_loss_penalty
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: SearchConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.rollouts(), 1000);
        assert_eq!(config.retry_limit, 100);
        assert_eq!(config.forced_loss_penalty, -100.0);
        assert!((config.exploration - 2f64.sqrt()).abs() < 1e-12);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert!(SearchConfig::new(0).validate().is_err());
        assert!(SearchConfig::new(u32::MAX as usize).validate().is_ok());
        assert!(matches!(
            SearchConfig::new(u32::MAX as usize + 1).validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(SearchConfig::new(10).with_exploration(-1.0).validate().is_err());
        assert!(SearchConfig::new(10).with_exploration(f64::NAN).validate().is_err());
        assert!(SearchConfig::new(10).with_rollouts_per_leaf(0).validate().is_err());
        assert!(SearchConfig::new(10).with_retry_limit(0).validate().is_err());
        assert!(
            SearchConfig::new(10)
                .with_forced_loss_penalty(f64::NEG_INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"iterations": 25, "seed": 7}"#).unwrap();
        assert_eq!(config.iterations, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.retry_limit, DEFAULT_RETRY_LIMIT);
        assert_eq!(config.rollouts(), 25);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        let config = SearchConfig::new(64).with_seed(3).with_rollouts_per_leaf(8);

        config.save(&path).unwrap();
        let loaded = SearchConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"iterations": 0}"#).unwrap();
        assert!(matches!(
            SearchConfig::load(&path),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
