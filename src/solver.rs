use log::{debug, info, warn};

use crate::error::SolveError;
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::path::{SolutionPath, reconstruct};
use crate::pqueue::PriorityQueue;
use crate::state::{State, StateId};
use crate::visited::VisitedSet;

/// What to do when a child's grid has already been generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Drop the child. With FIFO tie-breaking a grid can keep the longer of two routes, so the
    /// reported solution is not always the shortest.
    Discard,
    /// Drop the child, but if it is a cheaper route to a grid still waiting on the frontier,
    /// move that grid's state onto the cheaper route.
    Reparent,
}

pub struct SolverConfig {
    /// Maximum number of expansions before giving up
    pub max_iterations: usize,
    /// Reject start/goal pairs of different permutation parity before searching
    pub check_parity: bool,
    pub duplicates: DuplicatePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: 10_000_000,
            check_parity: true,
            duplicates: DuplicatePolicy::Reparent,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose children have been generated
    pub nodes_expanded: usize,
    /// Children scored and pushed onto the frontier (root excluded)
    pub nodes_generated: usize,
    /// States still waiting on the frontier
    pub frontier_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Searching,
    Solved,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Number of moves, the g-score of the goal state
    pub moves: usize,
    pub stats: SearchStats,
    pub path: SolutionPath,
}

/// Hook called for every state the solver expands.
pub trait Tracer {
    fn trace(&self, state: &State, stats: &SearchStats);
}

pub struct NullTracer;

impl Tracer for NullTracer {
    fn trace(&self, _state: &State, _stats: &SearchStats) {}
}

/// A* search over grids, driven by heuristic `H`.
///
/// Every generated state lives in an arena and is referenced by [`StateId`]. Children are
/// marked visited when generated, so a grid is scored at most once and expanded at most once
/// per run. Frontier entries carry the f-score they were queued with; an entry whose state has
/// since been reparented or expanded is stale and skipped when popped.
pub struct Solver<H: Heuristic, T: Tracer = NullTracer> {
    start: Grid,
    goal: Grid,
    heuristic: H,
    config: SolverConfig,
    tracer: Option<T>,
    states: Vec<State>,
    frontier: PriorityQueue<(u16, StateId)>,
    stale_entries: usize,
    visited: VisitedSet,
    nodes_expanded: usize,
    nodes_generated: usize,
    phase: Phase,
}

impl<H: Heuristic> Solver<H, NullTracer> {
    pub fn new(start: Grid, goal: Grid, heuristic: H, config: SolverConfig) -> Self {
        Solver {
            start,
            goal,
            heuristic,
            config,
            tracer: None,
            states: Vec::new(),
            frontier: PriorityQueue::new(),
            stale_entries: 0,
            visited: VisitedSet::new(),
            nodes_expanded: 0,
            nodes_generated: 0,
            phase: Phase::Initialized,
        }
    }
}

impl<H: Heuristic, T: Tracer> Solver<H, T> {
    pub fn with_tracer<U: Tracer>(self, tracer: Option<U>) -> Solver<H, U> {
        Solver {
            start: self.start,
            goal: self.goal,
            heuristic: self.heuristic,
            config: self.config,
            tracer,
            states: self.states,
            frontier: self.frontier,
            stale_entries: self.stale_entries,
            visited: self.visited,
            nodes_expanded: self.nodes_expanded,
            nodes_generated: self.nodes_generated,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes_expanded: self.nodes_expanded,
            nodes_generated: self.nodes_generated,
            frontier_len: self.frontier.len() - self.stale_entries,
        }
    }

    /// Run the search from scratch. Anything left over from a previous run is discarded first.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        self.reset();

        if self.config.check_parity && !self.start.is_solvable_to(&self.goal) {
            warn!("start and goal differ in permutation parity, not searching");
            return Err(SolveError::Unsolvable);
        }

        let mut root = State::root(self.start);
        root.set_h(self.heuristic.estimate(root.grid()));
        debug!("search started: h={}", root.h());
        self.push_state(root);
        debug!("phase {:?} -> {:?}", self.phase, Phase::Searching);
        self.phase = Phase::Searching;

        while let Some((f, id)) = self.frontier.pop_min() {
            let state = &self.states[id.index()];
            if state.is_expanded() || state.f() != f {
                self.stale_entries -= 1;
                continue;
            }

            if state.is_goal(&self.goal) {
                debug!("phase {:?} -> {:?}", self.phase, Phase::Solved);
                self.phase = Phase::Solved;
                let moves = state.g() as usize;
                let stats = self.stats();
                info!(
                    "solved in {} moves: expanded={}, generated={}, frontier={}",
                    moves, stats.nodes_expanded, stats.nodes_generated, stats.frontier_len
                );
                return Ok(Solution {
                    moves,
                    stats,
                    path: reconstruct(&self.states, id),
                });
            }

            if self.nodes_expanded >= self.config.max_iterations {
                warn!("iteration bound {} reached", self.config.max_iterations);
                return Err(self.exhaust());
            }

            if let Some(tracer) = &self.tracer {
                tracer.trace(state, &self.stats());
            }

            self.expand(id);
            self.nodes_expanded += 1;
        }

        warn!("frontier exhausted without reaching the goal");
        Err(self.exhaust())
    }

    fn reset(&mut self) {
        self.states.clear();
        self.frontier = PriorityQueue::new();
        self.stale_entries = 0;
        self.visited.clear();
        self.nodes_expanded = 0;
        self.nodes_generated = 0;
        self.phase = Phase::Initialized;
    }

    fn exhaust(&mut self) -> SolveError {
        debug!(
            "phase {:?} -> {:?}: lowest queued f={:?}",
            self.phase,
            Phase::Exhausted,
            self.frontier.min_priority()
        );
        self.phase = Phase::Exhausted;
        SolveError::SearchExhausted(self.stats())
    }

    fn push_state(&mut self, state: State) {
        let id = StateId(self.states.len() as u32);
        self.visited.insert(state.grid(), id);
        self.frontier.push(state.f() as usize, (state.f(), id));
        self.states.push(state);
    }

    fn expand(&mut self, id: StateId) {
        self.states[id.index()].mark_expanded();
        let parent = self.states[id.index()];

        for dir in parent.legal_moves() {
            let mut child = parent.child(id, dir);
            if let Some(existing) = self.visited.get(child.grid()) {
                if self.config.duplicates == DuplicatePolicy::Reparent {
                    self.reparent(existing, &child);
                }
                continue;
            }
            child.set_h(self.heuristic.estimate(child.grid()));
            self.nodes_generated += 1;
            self.push_state(child);
        }
    }

    /// Move `existing` onto the route `candidate` took, if that route is cheaper and
    /// `existing` has not been expanded yet.
    fn reparent(&mut self, existing: StateId, candidate: &State) {
        let state = &mut self.states[existing.index()];
        if state.is_expanded() || candidate.g() >= state.g() {
            return;
        }
        if let (Some(parent), Some(dir)) = (candidate.parent(), candidate.direction()) {
            state.reparent(parent, dir, candidate.g());
            let f = state.f();
            self.frontier.push(f as usize, (f, existing));
            self.stale_entries += 1;
        }
    }
}
