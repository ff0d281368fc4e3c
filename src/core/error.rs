use thiserror::Error;

use crate::core::types::Position;

/// Rejected construction parameters, or a config file that could not be read
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("agent_count must be positive, got {0}")]
    AgentCount(usize),

    #[error("grid_size must be positive, got {0}")]
    GridSize(i32),

    #[error("feeder {feeder} initial food must be non-negative, got {food}")]
    NegativeFood { feeder: char, food: i64 },

    #[error("feeders A and B share the cell {0:?}")]
    FeedersCoincide(Position),

    #[error("nest shares the cell {0:?} with a feeder")]
    NestOnFeeder(Position),

    #[error("{name} position {position:?} lies outside a grid of size {grid_size}")]
    OutOfBounds {
        name: &'static str,
        position: Position,
        grid_size: i32,
    },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violated at step {step}: {reason}")]
    InvariantViolation { step: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, ColonyError>;
