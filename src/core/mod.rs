pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{ColonyConfig, FeederConfig};
pub use random::{RandomSource, ScriptedSource, SeededSource};
