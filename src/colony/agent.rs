//! Agents: movement and the commitment state machine
//!
//! An agent only ever changes its own fields. Effects on other agents
//! (recruitment) are returned to the colony as proposals and applied once
//! every agent has been updated, so all agents see the same snapshot.

use serde::{Deserialize, Serialize};

use crate::colony::feeder::Feeder;
use crate::core::config::ColonyConfig;
use crate::core::random::RandomSource;
use crate::core::types::{CommitmentState, FeederId, Position};
use crate::spatial::Torus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Position,
    pub state: CommitmentState,
    pub carrying_food: bool,
}

/// Transition probabilities shared by every agent
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub p_attrition: f64,
    pub p_recruit: f64,
    pub p_give_up: f64,
}

impl From<&ColonyConfig> for Behavior {
    fn from(config: &ColonyConfig) -> Self {
        Self {
            p_attrition: config.p_attrition,
            p_recruit: config.p_recruit,
            p_give_up: config.p_give_up,
        }
    }
}

impl Behavior {
    /// Chance that at least one of `encounters` triggers reconsideration
    pub fn attrition_chance(&self, encounters: usize) -> f64 {
        let encounters = i32::try_from(encounters).unwrap_or(i32::MAX);
        1.0 - (1.0 - self.p_attrition).powi(encounters)
    }
}

/// What an agent can see during the update phase
pub struct Surroundings<'a> {
    pub nest: Position,
    /// Indices of agents within Chebyshev distance 1, ascending
    pub neighbors: &'a [usize],
    /// Every agent's state as it was before this update phase
    pub snapshot: &'a [CommitmentState],
}

/// The agent's own state change this step, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Attrited,
    PickedUp(FeederId),
    Delivered { feeder: FeederId, gave_up: bool },
}

/// A request to convert an uncommitted neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recruitment {
    pub target: usize,
    pub feeder: FeederId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    pub transition: Option<Transition>,
    pub recruits: Vec<Recruitment>,
}

impl Agent {
    /// A fresh, uncommitted, empty-handed agent at the nest
    pub fn new(nest: Position) -> Self {
        Self {
            position: nest,
            state: CommitmentState::Uncommitted,
            carrying_food: false,
        }
    }

    /// Take one random step; wraps at the grid edges
    pub fn move_randomly<R: RandomSource>(&mut self, torus: &Torus, rng: &mut R) {
        let direction = rng.next_direction();
        self.position = torus.step(self.position, direction);
    }

    /// Apply attrition, feeder interaction and recruitment, in that order
    ///
    /// Feeder food is changed in place; only this agent's fields and the
    /// feeder it stands on are written.
    pub fn update<R: RandomSource>(
        &mut self,
        feeders: &mut [Feeder; 2],
        surroundings: &Surroundings<'_>,
        behavior: &Behavior,
        rng: &mut R,
    ) -> UpdateOutcome {
        let encounters = surroundings.neighbors.len();

        if self.state.is_committed()
            && !self.carrying_food
            && encounters > 0
            && rng.chance(behavior.attrition_chance(encounters))
        {
            self.state = CommitmentState::Uncommitted;
            return UpdateOutcome {
                transition: Some(Transition::Attrited),
                recruits: Vec::new(),
            };
        }

        let transition = self.interact(feeders, surroundings.nest, behavior, rng);

        let mut recruits = Vec::new();
        if let (true, Some(feeder)) = (self.carrying_food, self.state.feeder()) {
            for &target in surroundings.neighbors {
                if surroundings.snapshot[target] == CommitmentState::Uncommitted
                    && rng.chance(behavior.p_recruit)
                {
                    recruits.push(Recruitment { target, feeder });
                }
            }
        }

        UpdateOutcome { transition, recruits }
    }

    /// Pickup on a feeder cell, otherwise delivery on the nest cell
    fn interact<R: RandomSource>(
        &mut self,
        feeders: &mut [Feeder; 2],
        nest: Position,
        behavior: &Behavior,
        rng: &mut R,
    ) -> Option<Transition> {
        if let Some(feeder) = feeders.iter_mut().find(|f| f.position() == self.position) {
            if !self.carrying_food && feeder.take() {
                self.carrying_food = true;
                self.state = feeder.id.commitment();
                return Some(Transition::PickedUp(feeder.id));
            }
            return None;
        }

        if !self.carrying_food || self.position != nest {
            return None;
        }
        // A carrying agent is always committed; the colony flags it otherwise
        let feeder = self.state.feeder()?;
        feeders[feeder.index()].restock();
        self.carrying_food = false;

        let gave_up = rng.chance(behavior.p_give_up);
        if gave_up {
            self.state = CommitmentState::Uncommitted;
        }
        Some(Transition::Delivered { feeder, gave_up })
    }
}
