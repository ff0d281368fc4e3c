//! Toroidal grid arithmetic
//!
//! Movement wraps on both axes. Neighborhoods do not: an agent on the x = 0
//! column does not sense one on x = size - 1.

use crate::core::types::{Direction, Position};

/// All 8 offsets around a cell plus the cell itself
const BLOCK_3X3: [(i32, i32); 9] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Square grid of side `size` with periodic boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    size: i32,
}

impl Torus {
    /// `size` must be positive; [`crate::ColonyConfig::validate`] guarantees it
    pub fn new(size: i32) -> Self {
        debug_assert!(size > 0, "torus size must be positive");
        Self { size }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    fn wrap_axis(&self, v: i32) -> i32 {
        v.rem_euclid(self.size)
    }

    #[inline]
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(self.wrap_axis(pos.x), self.wrap_axis(pos.y))
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Apply a move and wrap back onto the grid
    #[inline]
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        self.wrap(pos + direction)
    }

    /// Chebyshev (L-inf) distance on plain coordinates
    ///
    /// Only movement wraps; sensing does not reach across an edge, so cells
    /// on opposite edges are `size - 1` apart.
    pub fn chebyshev(&self, a: Position, b: Position) -> i32 {
        (a.x - b.x).abs().max((a.y - b.y).abs())
    }

    /// On-grid cells within Chebyshev distance 1 of `pos`, including `pos`
    ///
    /// Edge cells get a clipped block (6 cells, or 4 in a corner).
    pub fn block_around(&self, pos: Position) -> Vec<Position> {
        BLOCK_3X3
            .iter()
            .map(|&(dx, dy)| Position::new(pos.x + dx, pos.y + dy))
            .filter(|&cell| self.contains(cell))
            .collect()
    }
}
