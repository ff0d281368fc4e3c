//! End-of-run report and serialization

use serde::{Deserialize, Serialize};

use crate::colony::metrics::{MetricsEntry, StepEvents};
use crate::colony::simulation::Colony;
use crate::core::config::ColonyConfig;
use crate::core::random::RandomSource;
use crate::core::types::FeederId;

/// Snapshot of a colony run: what was configured and how it ended
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub config: ColonyConfig,
    pub steps_run: u64,
    /// Last metrics entry; `None` before the first step
    pub final_entry: Option<MetricsEntry>,
    pub peak_committed_a: usize,
    pub peak_committed_b: usize,
    pub carrying: usize,
    pub totals: StepEvents,
}

impl RunSummary {
    pub fn new<R: RandomSource>(colony: &Colony<R>) -> Self {
        let metrics = colony.metrics();
        Self {
            config: colony.config().clone(),
            steps_run: colony.steps_run(),
            final_entry: metrics.last().cloned(),
            peak_committed_a: metrics.peak_committed(FeederId::A),
            peak_committed_b: metrics.peak_committed(FeederId::B),
            carrying: colony.agents().iter().filter(|a| a.carrying_food).count(),
            totals: metrics.total_events(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let Some(last) = &self.final_entry else {
            return format!("No steps run ({} agents)", self.config.agent_count);
        };
        format!(
            "Ran {} steps with {} agents\n\
             Committed A: {} (peak {}), committed B: {} (peak {}), uncommitted: {}\n\
             Food A: {}, food B: {}, carried: {}\n\
             {} pickups, {} deliveries, {} recruitments, {} attritions, {} give-ups",
            self.steps_run,
            self.config.agent_count,
            last.committed_a,
            self.peak_committed_a,
            last.committed_b,
            self.peak_committed_b,
            last.uncommitted,
            last.food_a,
            last.food_b,
            self.carrying,
            self.totals.pickups[0] + self.totals.pickups[1],
            self.totals.deliveries[0] + self.totals.deliveries[1],
            self.totals.recruitments,
            self.totals.attritions,
            self.totals.give_ups,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_before_any_step() {
        let colony = Colony::new(ColonyConfig::default()).unwrap();
        let summary = colony.summary();
        assert_eq!(summary.steps_run, 0);
        assert!(summary.final_entry.is_none());
        assert!(summary.summary().starts_with("No steps run"));
    }

    #[test]
    fn test_summary_after_run() {
        let mut colony = Colony::new(ColonyConfig::default()).unwrap();
        colony.run(50).unwrap();
        let summary = colony.summary();

        assert_eq!(summary.steps_run, 50);
        assert_eq!(summary.final_entry.as_ref().map(|e| e.step), Some(50));
        assert!(summary.summary().contains("Ran 50 steps with 100 agents"));

        let json: serde_json::Value = serde_json::from_str(&summary.to_json()).unwrap();
        assert_eq!(json["steps_run"], 50);
        assert_eq!(json["config"]["seed"], 42);
    }
}
