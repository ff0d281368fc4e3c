//! Per-step metrics time series

use serde::{Deserialize, Serialize};

use crate::colony::agent::Transition;
use crate::core::types::FeederId;

/// Counts of state changes during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvents {
    /// Units taken, indexed by [`FeederId::index`]
    pub pickups: [u64; 2],
    /// Units returned, indexed by [`FeederId::index`]
    pub deliveries: [u64; 2],
    pub recruitments: u64,
    pub attritions: u64,
    pub give_ups: u64,
}

impl StepEvents {
    pub fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Attrited => self.attritions += 1,
            Transition::PickedUp(feeder) => self.pickups[feeder.index()] += 1,
            Transition::Delivered { feeder, gave_up } => {
                self.deliveries[feeder.index()] += 1;
                if gave_up {
                    self.give_ups += 1;
                }
            }
        }
    }

    pub fn pickups_at(&self, feeder: FeederId) -> u64 {
        self.pickups[feeder.index()]
    }

    pub fn deliveries_to(&self, feeder: FeederId) -> u64 {
        self.deliveries[feeder.index()]
    }

    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }

    /// Accumulate another step's events into this tally
    pub fn absorb(&mut self, other: &StepEvents) {
        for i in 0..2 {
            self.pickups[i] += other.pickups[i];
            self.deliveries[i] += other.deliveries[i];
        }
        self.recruitments += other.recruitments;
        self.attritions += other.attritions;
        self.give_ups += other.give_ups;
    }
}

/// Aggregate colony state at the end of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsEntry {
    /// 1-based number of the step that produced this entry
    pub step: u64,
    pub committed_a: usize,
    pub committed_b: usize,
    pub uncommitted: usize,
    pub food_a: i64,
    pub food_b: i64,
    pub events: StepEvents,
}

impl MetricsEntry {
    pub fn committed_to(&self, feeder: FeederId) -> usize {
        match feeder {
            FeederId::A => self.committed_a,
            FeederId::B => self.committed_b,
        }
    }

    pub fn food_at(&self, feeder: FeederId) -> i64 {
        match feeder {
            FeederId::A => self.food_a,
            FeederId::B => self.food_b,
        }
    }

    pub fn population(&self) -> usize {
        self.committed_a + self.committed_b + self.uncommitted
    }

    /// Committed agents per uncommitted agent; 0.0 when nobody is uncommitted
    pub fn commitment_ratio(&self) -> f64 {
        if self.uncommitted == 0 {
            0.0
        } else {
            (self.committed_a + self.committed_b) as f64 / self.uncommitted as f64
        }
    }
}

/// Append-only log, one entry per completed step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsLog {
    entries: Vec<MetricsEntry>,
}

impl MetricsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: MetricsEntry) -> &MetricsEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MetricsEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&MetricsEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricsEntry> {
        self.entries.iter()
    }

    pub fn committed_series(&self, feeder: FeederId) -> Vec<usize> {
        self.entries.iter().map(|e| e.committed_to(feeder)).collect()
    }

    pub fn uncommitted_series(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.uncommitted).collect()
    }

    pub fn food_series(&self, feeder: FeederId) -> Vec<i64> {
        self.entries.iter().map(|e| e.food_at(feeder)).collect()
    }

    pub fn commitment_ratio_series(&self) -> Vec<f64> {
        self.entries.iter().map(MetricsEntry::commitment_ratio).collect()
    }

    /// Highest commitment to `feeder` seen so far
    pub fn peak_committed(&self, feeder: FeederId) -> usize {
        self.entries.iter().map(|e| e.committed_to(feeder)).max().unwrap_or(0)
    }

    /// Events summed over every logged step
    pub fn total_events(&self) -> StepEvents {
        let mut totals = StepEvents::default();
        for entry in &self.entries {
            totals.absorb(&entry.events);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(step: u64, a: usize, b: usize, u: usize) -> MetricsEntry {
        MetricsEntry {
            step,
            committed_a: a,
            committed_b: b,
            uncommitted: u,
            food_a: 100,
            food_b: 100,
            events: StepEvents::default(),
        }
    }

    #[test]
    fn test_record_transitions() {
        let mut events = StepEvents::default();
        assert!(events.is_quiet());

        events.record(Transition::PickedUp(FeederId::B));
        events.record(Transition::Delivered {
            feeder: FeederId::A,
            gave_up: true,
        });
        events.record(Transition::Delivered {
            feeder: FeederId::A,
            gave_up: false,
        });
        events.record(Transition::Attrited);

        assert_eq!(events.pickups_at(FeederId::B), 1);
        assert_eq!(events.pickups_at(FeederId::A), 0);
        assert_eq!(events.deliveries_to(FeederId::A), 2);
        assert_eq!(events.give_ups, 1);
        assert_eq!(events.attritions, 1);
        assert!(!events.is_quiet());
    }

    #[test]
    fn test_commitment_ratio() {
        assert_eq!(entry(1, 0, 0, 10).commitment_ratio(), 0.0);
        assert_eq!(entry(1, 3, 2, 5).commitment_ratio(), 1.0);
        // Everyone committed: reported as 0.0 rather than infinity
        assert_eq!(entry(1, 6, 4, 0).commitment_ratio(), 0.0);
    }

    #[test]
    fn test_series_and_peaks() {
        let mut log = MetricsLog::new();
        assert!(log.is_empty());
        log.push(entry(1, 1, 0, 9));
        log.push(entry(2, 4, 2, 4));
        log.push(entry(3, 2, 3, 5));

        assert_eq!(log.len(), 3);
        assert_eq!(log.committed_series(FeederId::A), vec![1, 4, 2]);
        assert_eq!(log.uncommitted_series(), vec![9, 4, 5]);
        assert_eq!(log.peak_committed(FeederId::B), 3);
        assert_eq!(log.last().map(|e| e.step), Some(3));
    }

    #[test]
    fn test_total_events() {
        let mut log = MetricsLog::new();
        let mut first = entry(1, 0, 0, 1);
        first.events.pickups = [2, 1];
        first.events.recruitments = 3;
        let mut second = entry(2, 0, 0, 1);
        second.events.pickups = [1, 0];
        second.events.deliveries = [1, 1];
        log.push(first);
        log.push(second);

        let totals = log.total_events();
        assert_eq!(totals.pickups, [3, 1]);
        assert_eq!(totals.deliveries, [1, 1]);
        assert_eq!(totals.recruitments, 3);
    }

    #[test]
    fn test_totals_exceed_u32_range() {
        let mut step_events = StepEvents::default();
        step_events.recruitments = u64::from(u32::MAX);
        step_events.pickups = [u64::from(u32::MAX), 1];

        let mut totals = StepEvents::default();
        totals.absorb(&step_events);
        totals.absorb(&step_events);

        assert_eq!(totals.recruitments, 2 * u64::from(u32::MAX));
        assert_eq!(totals.pickups, [2 * u64::from(u32::MAX), 2]);
    }
}
