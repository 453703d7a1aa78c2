//! Configuration types for the engine and its runner.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Dimensions, RuleFamily};

/// How a world is populated when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    Random,
    Blank,
}

/// World configuration parameters, fixed for the life of a world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid, in cells
    pub width: i32,
    /// Height of the world grid, in cells
    pub height: i32,
    /// Display pixels per cell
    pub pixel_scale: i32,
    /// Rule family used by `tick`
    pub rule_family: RuleFamily,
    /// Content of the world at construction
    pub initial: InitialState,
    /// Probability that `reload` seeds a cell as `Alive` (0.0 to 1.0)
    pub alive_probability: f64,
    /// Random seed for reproducibility; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 70,
            pixel_scale: 10,
            rule_family: RuleFamily::ThreeState,
            initial: InitialState::Random,
            alive_probability: 0.5,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn new(width: i32, height: i32, pixel_scale: i32, rule_family: RuleFamily) -> Self {
        Self {
            width,
            height,
            pixel_scale,
            rule_family,
            ..Default::default()
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Reject configurations no world can be built from
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 {
            return Err(Error::Config(format!("width must be positive, got {}", self.width)));
        }
        if self.height <= 0 {
            return Err(Error::Config(format!("height must be positive, got {}", self.height)));
        }
        if self.pixel_scale <= 0 {
            return Err(Error::Config(format!(
                "pixel_scale must be positive, got {}",
                self.pixel_scale
            )));
        }
        if (self.width as i64) * (self.height as i64) > i32::MAX as i64 {
            return Err(Error::Config(format!(
                "grid of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(Error::Config(format!(
                "alive_probability must be within [0, 1], got {}",
                self.alive_probability
            )));
        }
        Ok(())
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// World to simulate
    pub world: WorldConfig,
    /// Delay between scheduled ticks (milliseconds)
    pub tick_interval_ms: u64,
    /// Generations between census log lines (0 disables them)
    pub census_interval: u64,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Start with the scheduler paused
    pub start_paused: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tick_interval_ms: 100,
            census_interval: 100,
            max_ticks: None,
            start_paused: false,
        }
    }
}

impl RunnerConfig {
    /// Load a runner configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&contents)?;
        debug!("Loaded runner config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.width, 120);
        assert_eq!(world_config.height, 70);
        assert_eq!(world_config.pixel_scale, 10);
        assert!(world_config.validate().is_ok());

        let runner_config = RunnerConfig::default();
        assert_eq!(runner_config.tick_interval_ms, 100);
        assert!(runner_config.max_ticks.is_none());
    }

    #[test]
    fn test_validate_rejects_non_positive_dimensions() {
        for (w, h, s) in [(0, 10, 1), (10, 0, 1), (10, 10, 0), (-3, 10, 1), (10, 10, -1)] {
            let config = WorldConfig::new(w, h, s, RuleFamily::TwoState);
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{w}x{h} scale {s}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = WorldConfig {
            alive_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = WorldConfig {
            alive_probability: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "world": { "width": 8, "rule_family": "two-state" }, "max_ticks": 5 }"#;
        let config: RunnerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.world.width, 8);
        assert_eq!(config.world.height, 70);
        assert_eq!(config.world.rule_family, RuleFamily::TwoState);
        assert_eq!(config.max_ticks, Some(5));
        assert_eq!(config.tick_interval_ms, 100);
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = RunnerConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
