//! The foraging colony: agents, feeders, the step driver and its metrics

pub mod agent;
pub mod feeder;
pub mod metrics;
pub mod output;
pub mod simulation;

pub use agent::{Agent, Behavior, Recruitment, Surroundings, Transition, UpdateOutcome};
pub use feeder::Feeder;
pub use metrics::{MetricsEntry, MetricsLog, StepEvents};
pub use output::RunSummary;
pub use simulation::Colony;
