//! Colony configuration with documented constants
//!
//! Every tunable of a run lives in [`ColonyConfig`]. The struct is passed to
//! [`crate::colony::Colony::new`], which validates it before building anything.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::Position;

/// Placement and starting stock of one feeder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeederConfig {
    pub position: Position,
    /// Signed so that a negative stock in a config file is reported, not wrapped
    pub initial_food: i64,
}

/// Configuration for one colony run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyConfig {
    // === SPACE ===
    /// Side length of the square toroidal grid
    pub grid_size: i32,

    /// Cell every agent starts on and returns food to
    pub nest: Position,

    pub feeder_a: FeederConfig,
    pub feeder_b: FeederConfig,

    // === POPULATION ===
    /// Number of agents; fixed for the whole run
    pub agent_count: usize,

    // === BEHAVIOR ===
    /// Per-encounter chance that a committed, empty-handed agent reconsiders
    ///
    /// With k neighbors the chance of reverting in one step is
    /// `1 - (1 - p_attrition)^k`.
    pub p_attrition: f64,

    /// Chance that a carrying agent converts one uncommitted neighbor
    pub p_recruit: f64,

    /// Chance of dropping commitment right after a delivery at the nest
    pub p_give_up: f64,

    /// Seed for the colony's random source
    pub seed: u64,

    // === PARALLELIZATION ===
    /// Minimum agent count before neighbor queries run on the rayon pool
    ///
    /// Below this, thread overhead exceeds the cost of the queries themselves.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    1000
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            nest: Position::new(25, 5),
            feeder_a: FeederConfig {
                position: Position::new(10, 40),
                initial_food: 100,
            },
            feeder_b: FeederConfig {
                position: Position::new(40, 40),
                initial_food: 100,
            },
            agent_count: 100,
            p_attrition: 0.1,
            p_recruit: 0.5,
            p_give_up: 0.8,
            seed: 42,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl ColonyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_agent_count(mut self, agent_count: usize) -> Self {
        self.agent_count = agent_count;
        self
    }

    /// Set the same starting stock on both feeders
    pub fn with_initial_food(mut self, food: i64) -> Self {
        self.feeder_a.initial_food = food;
        self.feeder_b.initial_food = food;
        self
    }

    pub fn with_probabilities(mut self, p_attrition: f64, p_recruit: f64, p_give_up: f64) -> Self {
        self.p_attrition = p_attrition;
        self.p_recruit = p_recruit;
        self.p_give_up = p_give_up;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_count == 0 {
            return Err(ConfigError::AgentCount(self.agent_count));
        }
        if self.grid_size <= 0 {
            return Err(ConfigError::GridSize(self.grid_size));
        }

        for (label, feeder) in [('A', &self.feeder_a), ('B', &self.feeder_b)] {
            if feeder.initial_food < 0 {
                return Err(ConfigError::NegativeFood {
                    feeder: label,
                    food: feeder.initial_food,
                });
            }
        }

        for (name, position) in [
            ("nest", self.nest),
            ("feeder A", self.feeder_a.position),
            ("feeder B", self.feeder_b.position),
        ] {
            let in_range = |v: i32| (0..self.grid_size).contains(&v);
            if !in_range(position.x) || !in_range(position.y) {
                return Err(ConfigError::OutOfBounds {
                    name,
                    position,
                    grid_size: self.grid_size,
                });
            }
        }

        if self.feeder_a.position == self.feeder_b.position {
            return Err(ConfigError::FeedersCoincide(self.feeder_a.position));
        }
        if self.nest == self.feeder_a.position || self.nest == self.feeder_b.position {
            return Err(ConfigError::NestOnFeeder(self.nest));
        }

        for (name, value) in [
            ("p_attrition", self.p_attrition),
            ("p_recruit", self.p_recruit),
            ("p_give_up", self.p_give_up),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        Ok(())
    }
}
