use std::fmt;
use std::str::FromStr;

use crate::error::SolveError;
use crate::grid::{CELLS, Grid};

/// Trait for estimating the number of moves needed to turn a grid into the goal.
///
/// The solver closes states when they are generated, which only yields optimal solutions when
/// the estimate is consistent: it may drop by at most one across a single move.
pub trait Heuristic {
    fn estimate(&self, grid: &Grid) -> u16;
}

/// Sum over all tiles (blank excluded) of the row and column distance to the tile's goal cell.
pub struct Manhattan {
    /// goal_positions[value] = (row, col) of `value` in the goal
    goal_positions: [(u8, u8); CELLS],
}

impl Manhattan {
    pub fn new(goal: &Grid) -> Self {
        Manhattan {
            goal_positions: goal.positions(),
        }
    }
}

impl Heuristic for Manhattan {
    fn estimate(&self, grid: &Grid) -> u16 {
        let mut total = 0u16;
        for (value, &(row, col)) in grid.positions().iter().enumerate().skip(1) {
            let (goal_row, goal_col) = self.goal_positions[value];
            total += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u16;
        }
        total
    }
}

/// Number of cells whose value differs from the goal. The blank's cell counts too.
pub struct Hamming {
    goal: Grid,
}

impl Hamming {
    pub fn new(goal: &Grid) -> Self {
        Hamming { goal: *goal }
    }
}

impl Heuristic for Hamming {
    fn estimate(&self, grid: &Grid) -> u16 {
        grid.cells()
            .iter()
            .zip(self.goal.cells())
            .filter(|(a, b)| a != b)
            .count() as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicType {
    Manhattan,
    Hamming,
}

impl FromStr for HeuristicType {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(HeuristicType::Manhattan),
            "hamming" => Ok(HeuristicType::Hamming),
            _ => Err(SolveError::UnsupportedHeuristic(s.to_string())),
        }
    }
}

impl fmt::Display for HeuristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicType::Manhattan => write!(f, "Manhattan"),
            HeuristicType::Hamming => write!(f, "Hamming"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::bfs_distances;

    #[test]
    fn test_manhattan_solved() {
        let goal = Grid::solved();
        assert_eq!(Manhattan::new(&goal).estimate(&goal), 0);
    }

    #[test]
    fn test_manhattan_ignores_blank() {
        let goal = Grid::solved();
        let grid: Grid = "123406758".parse().unwrap();
        // 5 is one row below its goal, 8 is one column right of its goal.
        assert_eq!(Manhattan::new(&goal).estimate(&grid), 2);
    }

    #[test]
    fn test_manhattan_far_corner() {
        let goal = Grid::solved();
        let grid: Grid = "823456710".parse().unwrap();
        // 8 and 1 sit in each other's goal cells, two rows and one column apart.
        assert_eq!(Manhattan::new(&goal).estimate(&grid), 6);
    }

    #[test]
    fn test_hamming_solved() {
        let goal = Grid::solved();
        assert_eq!(Hamming::new(&goal).estimate(&goal), 0);
    }

    #[test]
    fn test_hamming_counts_blank() {
        let goal = Grid::solved();
        let grid: Grid = "123406758".parse().unwrap();
        // Cells 4, 7 and 8 differ; cell 4 holds the blank.
        assert_eq!(Hamming::new(&goal).estimate(&grid), 3);
    }

    #[test]
    fn test_manhattan_admissible_and_consistent() {
        let goal = Grid::solved();
        let heuristic = Manhattan::new(&goal);
        let distances = bfs_distances(&goal);

        for (&key, &dist) in distances.iter() {
            let grid = Grid::from_key(key).unwrap();
            let h = heuristic.estimate(&grid);
            assert!(h as u32 <= dist, "h={} exceeds distance {} for {:?}", h, dist, grid);

            let blank = grid.blank_index();
            for dir in Grid::legal_moves_from(blank) {
                let (next, _) = grid.slide(blank, dir);
                assert!(heuristic.estimate(&next) + 1 >= h);
            }
        }
    }

    #[test]
    fn test_heuristic_type_from_str() {
        assert_eq!("manhattan".parse::<HeuristicType>(), Ok(HeuristicType::Manhattan));
        assert_eq!("Hamming".parse::<HeuristicType>(), Ok(HeuristicType::Hamming));
        assert_eq!(
            "euclid".parse::<HeuristicType>(),
            Err(SolveError::UnsupportedHeuristic("euclid".to_string()))
        );
    }
}
