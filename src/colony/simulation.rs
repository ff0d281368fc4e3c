//! Colony driver - owns every agent and feeder and advances them in lock-step
//!
//! Each step runs three phases:
//! movement -> neighbor snapshot -> state update (simultaneous) -> metrics
//!
//! Uses rayon for the neighbor queries once the colony is large enough;
//! they only read the snapshot, so the result does not depend on threading.

use rayon::prelude::*;

use crate::colony::agent::{Agent, Behavior, Surroundings};
use crate::colony::feeder::Feeder;
use crate::colony::metrics::{MetricsEntry, MetricsLog, StepEvents};
use crate::colony::output::RunSummary;
use crate::core::config::ColonyConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::random::{RandomSource, SeededSource};
use crate::core::types::{CommitmentState, FeederId, Position};
use crate::spatial::{SparseHashGrid, Torus};

/// The simulation: agents and feeders stored as flat arenas, addressed by index
pub struct Colony<R: RandomSource = SeededSource> {
    config: ColonyConfig,
    torus: Torus,
    agents: Vec<Agent>,
    feeders: [Feeder; 2],
    behavior: Behavior,
    rng: R,
    spatial: SparseHashGrid,
    metrics: MetricsLog,
    steps: u64,
    /// Feeder stock plus carried units; fixed for the run
    total_food: i64,
}

impl Colony<SeededSource> {
    /// Build a colony whose random source is seeded from `config.seed`
    pub fn new(config: ColonyConfig) -> Result<Self> {
        let rng = SeededSource::new(config.seed);
        Self::with_source(config, rng)
    }
}

impl<R: RandomSource> Colony<R> {
    /// Build a colony drawing from an explicit random source
    pub fn with_source(config: ColonyConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let torus = Torus::new(config.grid_size);
        let agents = vec![Agent::new(config.nest); config.agent_count];
        let feeders = [
            Feeder::from_config(FeederId::A, &config.feeder_a),
            Feeder::from_config(FeederId::B, &config.feeder_b),
        ];
        let total_food = config.feeder_a.initial_food + config.feeder_b.initial_food;

        tracing::debug!(
            agents = config.agent_count,
            grid_size = config.grid_size,
            seed = config.seed,
            "Colony constructed"
        );

        Ok(Self {
            behavior: Behavior::from(&config),
            spatial: SparseHashGrid::new(torus),
            config,
            torus,
            agents,
            feeders,
            rng,
            metrics: MetricsLog::new(),
            steps: 0,
            total_food,
        })
    }

    /// Advance one step and return the metrics entry it produced
    pub fn step(&mut self) -> Result<&MetricsEntry> {
        // 1. Movement, all agents in index order
        for agent in &mut self.agents {
            agent.move_randomly(&self.torus, &mut self.rng);
        }

        // 2. Snapshot after movement
        let neighbors = self.neighbor_sets();
        let snapshot: Vec<CommitmentState> = self.agents.iter().map(|a| a.state).collect();

        // 3. State update; recruitment is buffered, lowest recruiter index wins
        let mut events = StepEvents::default();
        let mut pending: Vec<Option<FeederId>> = vec![None; self.agents.len()];

        for (idx, agent) in self.agents.iter_mut().enumerate() {
            let surroundings = Surroundings {
                nest: self.config.nest,
                neighbors: &neighbors[idx],
                snapshot: &snapshot,
            };
            let outcome =
                agent.update(&mut self.feeders, &surroundings, &self.behavior, &mut self.rng);

            if let Some(transition) = outcome.transition {
                tracing::trace!(agent = idx, ?transition, "State transition");
                events.record(transition);
            }
            for recruitment in outcome.recruits {
                pending[recruitment.target].get_or_insert(recruitment.feeder);
            }
        }

        // An agent's own pickup this step outranks being recruited
        for (target, feeder) in pending.into_iter().enumerate() {
            let Some(feeder) = feeder else { continue };
            let agent = &mut self.agents[target];
            if agent.state == CommitmentState::Uncommitted {
                agent.state = feeder.commitment();
                events.recruitments += 1;
            }
        }

        // 4. Tally and 5. append; a failed check leaves the counter untouched
        let entry = self.tally(self.steps + 1, events);
        self.check_invariants(&entry)?;
        self.steps = entry.step;

        if !events.is_quiet() {
            tracing::debug!(
                step = self.steps,
                pickups = ?events.pickups,
                deliveries = ?events.deliveries,
                recruitments = events.recruitments,
                attritions = events.attritions,
                "Step events"
            );
        }

        Ok(self.metrics.push(entry))
    }

    /// Run exactly `num_steps` steps, stopping at the first invariant violation
    pub fn run(&mut self, num_steps: u64) -> Result<()> {
        tracing::debug!(from_step = self.steps, num_steps, "Running colony");
        for _ in 0..num_steps {
            self.step()?;
        }
        if let Some(last) = self.metrics.last() {
            tracing::debug!(
                step = last.step,
                committed_a = last.committed_a,
                committed_b = last.committed_b,
                uncommitted = last.uncommitted,
                food_a = last.food_a,
                food_b = last.food_b,
                "Run finished"
            );
        }
        Ok(())
    }

    /// Neighbor indices for every agent, from the current positions
    fn neighbor_sets(&mut self) -> Vec<Vec<usize>> {
        let positions: Vec<Position> = self.agents.iter().map(|a| a.position).collect();
        self.spatial.rebuild(&positions);
        let spatial = &self.spatial;

        if positions.len() >= self.config.parallel_threshold {
            positions
                .par_iter()
                .enumerate()
                .map(|(idx, &pos)| spatial.query_neighbors(pos, Some(idx)))
                .collect()
        } else {
            positions
                .iter()
                .enumerate()
                .map(|(idx, &pos)| spatial.query_neighbors(pos, Some(idx)))
                .collect()
        }
    }

    fn tally(&self, step: u64, events: StepEvents) -> MetricsEntry {
        let mut counts = [0usize; 3];
        for agent in &self.agents {
            let slot = match agent.state {
                CommitmentState::CommittedA => 0,
                CommitmentState::CommittedB => 1,
                CommitmentState::Uncommitted => 2,
            };
            counts[slot] += 1;
        }

        MetricsEntry {
            step,
            committed_a: counts[0],
            committed_b: counts[1],
            uncommitted: counts[2],
            food_a: self.feeders[FeederId::A.index()].food(),
            food_b: self.feeders[FeederId::B.index()].food(),
            events,
        }
    }

    fn check_invariants(&self, entry: &MetricsEntry) -> Result<()> {
        let violation = if entry.population() != self.config.agent_count {
            Some(format!(
                "population {} differs from agent_count {}",
                entry.population(),
                self.config.agent_count
            ))
        } else if entry.food_a < 0 || entry.food_b < 0 {
            Some(format!("negative food (A: {}, B: {})", entry.food_a, entry.food_b))
        } else if let Some(idx) = self
            .agents
            .iter()
            .position(|a| a.carrying_food && !a.state.is_committed())
        {
            Some(format!("agent {} carries food while uncommitted", idx))
        } else {
            let carried = self.agents.iter().filter(|a| a.carrying_food).count() as i64;
            let total = entry.food_a + entry.food_b + carried;
            (total != self.total_food)
                .then(|| format!("food total {} differs from {}", total, self.total_food))
        };

        match violation {
            None => Ok(()),
            Some(reason) => {
                tracing::error!(step = entry.step, %reason, "Invariant violated");
                Err(ColonyError::InvariantViolation {
                    step: entry.step,
                    reason,
                })
            }
        }
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Current position, state and cargo of every agent
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn feeders(&self) -> &[Feeder; 2] {
        &self.feeders
    }

    pub fn feeder(&self, id: FeederId) -> &Feeder {
        &self.feeders[id.index()]
    }

    pub fn food(&self, id: FeederId) -> i64 {
        self.feeder(id).food()
    }

    pub fn metrics(&self) -> &MetricsLog {
        &self.metrics
    }

    pub fn steps_run(&self) -> u64 {
        self.steps
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::new(self)
    }
}
