//! Sparse cell hash for neighbor queries on the torus

use ahash::AHashMap;

use crate::core::types::Position;
use crate::spatial::torus::Torus;

/// Agent indices bucketed by the cell they occupy
pub struct SparseHashGrid {
    torus: Torus,
    cells: AHashMap<Position, Vec<usize>>,
}

impl SparseHashGrid {
    pub fn new(torus: Torus) -> Self {
        Self {
            torus,
            cells: AHashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, index: usize, pos: Position) {
        self.cells.entry(pos).or_default().push(index);
    }

    /// Rebuild grid from positions, indexed by slice position
    pub fn rebuild(&mut self, positions: &[Position]) {
        self.clear();
        for (index, &pos) in positions.iter().enumerate() {
            self.insert(index, pos);
        }
    }

    /// Indices occupying exactly this cell
    pub fn occupants(&self, pos: Position) -> &[usize] {
        self.cells.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indices within Chebyshev distance 1 of `pos`, ascending
    ///
    /// `exclude` is dropped from the result, so an agent can query around its
    /// own cell without seeing itself.
    pub fn query_neighbors(&self, pos: Position, exclude: Option<usize>) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .torus
            .block_around(pos)
            .into_iter()
            .flat_map(|cell| self.occupants(cell).iter().copied())
            .filter(|&i| Some(i) != exclude)
            .collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: i32, positions: &[Position]) -> SparseHashGrid {
        let mut grid = SparseHashGrid::new(Torus::new(size));
        grid.rebuild(positions);
        grid
    }

    #[test]
    fn test_neighbors_exclude_self() {
        let positions = [Position::new(5, 5), Position::new(5, 5), Position::new(6, 6)];
        let grid = grid_with(20, &positions);
        assert_eq!(grid.query_neighbors(positions[0], Some(0)), vec![1, 2]);
    }

    #[test]
    fn test_neighbors_ignore_distance_two() {
        let positions = [Position::new(5, 5), Position::new(7, 5), Position::new(4, 4)];
        let grid = grid_with(20, &positions);
        assert_eq!(grid.query_neighbors(positions[0], Some(0)), vec![2]);
    }

    #[test]
    fn test_opposite_edges_are_not_neighbors() {
        let positions = [
            Position::new(0, 0),
            Position::new(19, 19),
            Position::new(19, 1),
            Position::new(0, 19),
            Position::new(1, 1),
        ];
        let grid = grid_with(20, &positions);
        assert_eq!(grid.query_neighbors(positions[0], Some(0)), vec![4]);
        assert_eq!(grid.query_neighbors(positions[1], Some(1)), Vec::<usize>::new());
    }

    #[test]
    fn test_tiny_grid_counts_each_agent_once() {
        let positions = [Position::new(0, 0), Position::new(1, 1), Position::new(1, 0)];
        let grid = grid_with(2, &positions);
        assert_eq!(grid.query_neighbors(positions[0], Some(0)), vec![1, 2]);
    }

    #[test]
    fn test_rebuild_clears_previous_positions() {
        let mut grid = grid_with(10, &[Position::new(1, 1)]);
        grid.rebuild(&[Position::new(8, 8)]);
        assert!(grid.occupants(Position::new(1, 1)).is_empty());
        assert_eq!(grid.occupants(Position::new(8, 8)), &[0]);
    }
}
