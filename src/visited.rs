use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::grid::Grid;
use crate::state::StateId;

/// Closed set of grids already generated during a search, keyed by canonical key and mapped
/// to the arena slot holding the grid's state.
pub struct VisitedSet {
    states: FxHashMap<u64, StateId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        VisitedSet {
            states: FxHashMap::default(),
        }
    }

    pub fn contains(&self, grid: &Grid) -> bool {
        self.states.contains_key(&grid.canonical_key())
    }

    pub fn get(&self, grid: &Grid) -> Option<StateId> {
        self.states.get(&grid.canonical_key()).copied()
    }

    /// Mark `grid` visited as state `id`. Returns false, leaving the existing entry alone, if
    /// the grid was already visited.
    pub fn insert(&mut self, grid: &Grid, id: StateId) -> bool {
        match self.states.entry(grid.canonical_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(id);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}
