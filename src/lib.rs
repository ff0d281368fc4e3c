//! Colony Forage - two-feeder collective foraging simulation

pub mod colony;
pub mod core;
pub mod spatial;

pub use crate::colony::{Agent, Colony, Feeder, MetricsEntry, MetricsLog, RunSummary, StepEvents};
pub use crate::core::config::ColonyConfig;
pub use crate::core::error::{ColonyError, ConfigError, Result};
pub use crate::core::random::{RandomSource, ScriptedSource, SeededSource};
pub use crate::core::types::{CommitmentState, Direction, FeederId, Position};
