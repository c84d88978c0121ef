//! A* search for the 8-puzzle.
//!
//! [`solver::Solver`] finds a shortest sequence of blank slides turning a start [`grid::Grid`]
//! into a goal grid, guided by one of the heuristics in [`heuristic`].

pub mod error;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod pqueue;
pub mod scramble;
pub mod solver;
pub mod state;
pub mod visited;
