//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Integer cell coordinate on the toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add<Direction> for Position {
    type Output = Self;
    fn add(self, rhs: Direction) -> Self {
        let (dx, dy) = rhs.offset();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// One of the nine moves available to an agent each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Stay,
    East,
    West,
    North,
    South,
    NorthEast,
    SouthWest,
    SouthEast,
    NorthWest,
}

impl Direction {
    /// All moves, in the order a uniform draw indexes them
    pub const ALL: [Direction; 9] = [
        Direction::Stay,
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
        Direction::NorthWest,
    ];

    /// (dx, dy) offset; north is +y
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Stay => (0, 0),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
            Direction::NorthWest => (-1, 1),
        }
    }
}

/// Label of one of the two feeders, doubling as its arena index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeederId {
    A,
    B,
}

impl FeederId {
    pub const BOTH: [FeederId; 2] = [FeederId::A, FeederId::B];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            FeederId::A => 0,
            FeederId::B => 1,
        }
    }

    /// The commitment an agent takes on when associated with this feeder
    pub fn commitment(self) -> CommitmentState {
        match self {
            FeederId::A => CommitmentState::CommittedA,
            FeederId::B => CommitmentState::CommittedB,
        }
    }
}

/// An agent's association with a feeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommitmentState {
    #[default]
    Uncommitted,
    CommittedA,
    CommittedB,
}

impl CommitmentState {
    pub fn is_committed(&self) -> bool {
        !matches!(self, CommitmentState::Uncommitted)
    }

    /// The feeder this state is committed to, if any
    pub fn feeder(&self) -> Option<FeederId> {
        match self {
            CommitmentState::Uncommitted => None,
            CommitmentState::CommittedA => Some(FeederId::A),
            CommitmentState::CommittedB => Some(FeederId::B),
        }
    }
}
