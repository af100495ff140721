//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Which rule produced the chosen column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Random column from the blunder roll.
    Blunder,
    /// Column that wins on the spot.
    ImmediateWin,
    /// Column the opponent would have won with.
    Block,
    /// Best column from the alpha-beta search.
    Search,
}

/// Statistics for the most recent `choose_move` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited by the minimax recursion.
    pub nodes: u64,

    /// Positions scored at the depth limit or as terminal.
    pub leaves: u64,

    /// Branches cut by alpha-beta.
    pub cutoffs: u64,

    /// Wall time of the decision (microseconds).
    pub time_us: u64,

    /// Rule that produced the move.
    pub decision: Option<Decision>,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.cutoffs, 0);
        assert_eq!(stats.decision, None);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.nodes_per_second(), 0.0);

        stats.nodes = 5000;
        stats.time_us = 500_000;
        assert_eq!(stats.nodes_per_second(), 10_000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.nodes = 100;
        stats.decision = Some(Decision::Block);

        stats.reset();

        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.decision, None);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.leaves = 42;
        stats.decision = Some(Decision::Search);

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.leaves, 42);
        assert_eq!(deserialized.decision, Some(Decision::Search));
    }
}
