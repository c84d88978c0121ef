use crate::grid::{Direction, Grid};
use crate::state::{State, StateId};

/// The grids from start to goal inclusive, and the blank slide between each pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath {
    pub grids: Vec<Grid>,
    pub moves: Vec<Direction>,
}

impl SolutionPath {
    /// Number of moves from start to goal.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Walk parent handles from `goal` back to the root and return the path in start-to-goal order.
pub fn reconstruct(states: &[State], goal: StateId) -> SolutionPath {
    let mut grids = Vec::new();
    let mut moves = Vec::new();
    let mut current = Some(goal);

    while let Some(id) = current {
        let state = &states[id.index()];
        grids.push(*state.grid());
        if let Some(dir) = state.direction() {
            moves.push(dir);
        }
        current = state.parent();
    }

    grids.reverse();
    moves.reverse();
    SolutionPath { grids, moves }
}
