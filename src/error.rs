use std::error::Error;
use std::fmt;

use crate::solver::SearchStats;

/// Error type for everything that can end a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Start or goal is not a permutation of 0..=8
    InvalidGrid(String),
    /// Heuristic name not recognised
    UnsupportedHeuristic(String),
    /// Iteration bound reached, or frontier drained, without finding the goal
    SearchExhausted(SearchStats),
    /// Start and goal have different permutation parity
    Unsolvable,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
            SolveError::UnsupportedHeuristic(name) => {
                write!(f, "Heuristic not supported: {}", name)
            }
            SolveError::SearchExhausted(stats) => write!(
                f,
                "Unable to find a solution (expanded: {}, frontier: {})",
                stats.nodes_expanded, stats.frontier_len
            ),
            SolveError::Unsolvable => {
                write!(f, "Goal is unreachable: start and goal differ in parity")
            }
        }
    }
}

impl Error for SolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SolveError::UnsupportedHeuristic("euclid".to_string());
        assert_eq!(err.to_string(), "Heuristic not supported: euclid");

        let err = SolveError::SearchExhausted(SearchStats {
            nodes_expanded: 10,
            nodes_generated: 25,
            frontier_len: 15,
        });
        assert_eq!(
            err.to_string(),
            "Unable to find a solution (expanded: 10, frontier: 15)"
        );
    }
}
