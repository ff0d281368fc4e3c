//! Feeders: fixed resource sites with a shared food stock
//!
//! Food leaves a feeder when an agent picks it up and comes back when a
//! committed agent delivers it at the nest.

use serde::{Deserialize, Serialize};

use crate::core::config::FeederConfig;
use crate::core::types::{FeederId, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feeder {
    pub id: FeederId,
    position: Position,
    food: i64,
}

impl Feeder {
    pub fn new(id: FeederId, position: Position, food: i64) -> Self {
        Self { id, position, food }
    }

    pub fn from_config(id: FeederId, config: &FeederConfig) -> Self {
        Self::new(id, config.position, config.initial_food)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn food(&self) -> i64 {
        self.food
    }

    pub fn has_food(&self) -> bool {
        self.food > 0
    }

    /// Take one unit; refused (returns false) when the feeder is empty
    pub fn take(&mut self) -> bool {
        if self.food > 0 {
            self.food -= 1;
            true
        } else {
            false
        }
    }

    /// Return one delivered unit to the stock
    pub fn restock(&mut self) {
        self.food += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_until_empty() {
        let mut feeder = Feeder::new(FeederId::A, Position::new(1, 1), 2);
        assert!(feeder.take());
        assert!(feeder.take());
        assert_eq!(feeder.food(), 0);
        assert!(!feeder.has_food());

        // Empty feeder refuses and never goes negative
        assert!(!feeder.take());
        assert_eq!(feeder.food(), 0);
    }

    #[test]
    fn test_restock() {
        let mut feeder = Feeder::new(FeederId::B, Position::new(1, 1), 0);
        feeder.restock();
        assert_eq!(feeder.food(), 1);
        assert!(feeder.take());
    }
}
