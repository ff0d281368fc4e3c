//! Random draws for the colony
//!
//! Every stochastic decision in a run goes through a [`RandomSource`] owned by
//! the colony, so a seed fully determines the run.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::Direction;

pub trait RandomSource {
    /// Uniform real in `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// One of the nine moves, each with probability 1/9
    fn next_direction(&mut self) -> Direction;

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_uniform() < p
    }
}

/// Deterministic source backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }
}

/// Replays fixed draws, for driving a colony through an exact scenario
///
/// Once a queue runs dry the source keeps answering `Stay` and
/// `fallback_uniform`, which defaults to just under 1.0 so that any
/// `chance(p)` with `p < 1` fails.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    directions: VecDeque<Direction>,
    uniforms: VecDeque<f64>,
    fallback_uniform: f64,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self {
            directions: VecDeque::new(),
            uniforms: VecDeque::new(),
            fallback_uniform: 1.0 - f64::EPSILON,
        }
    }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directions(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.directions.extend(directions);
        self
    }

    pub fn with_uniforms(mut self, uniforms: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(uniforms);
        self
    }

    pub fn with_fallback_uniform(mut self, value: f64) -> Self {
        self.fallback_uniform = value;
        self
    }

    /// Draws still queued, as (directions, uniforms)
    pub fn remaining(&self) -> (usize, usize) {
        (self.directions.len(), self.uniforms.len())
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(self.fallback_uniform)
    }

    fn next_direction(&mut self) -> Direction {
        self.directions.pop_front().unwrap_or(Direction::Stay)
    }
}
