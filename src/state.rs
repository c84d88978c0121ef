use arrayvec::ArrayVec;

use crate::grid::{Direction, Grid, SIZE};

/// Handle of a state inside the solver's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub u32);

impl StateId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A search node: a board snapshot plus its path costs and the node it was generated from.
///
/// The grid is never mutated after construction. The parent is an arena handle, and since
/// `g` strictly increases from parent to child the chain always ends at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    grid: Grid,
    blank: u8,
    g: u16,
    h: u16,
    f: u16,
    parent: Option<StateId>,
    direction: Option<Direction>,
    expanded: bool,
}

impl State {
    pub fn root(grid: Grid) -> Self {
        State {
            grid,
            blank: grid.blank_index() as u8,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
            direction: None,
            expanded: false,
        }
    }

    /// The state reached by sliding this state's blank in `dir`. Unscored until
    /// [`State::set_h`] is called.
    pub fn child(&self, id: StateId, dir: Direction) -> Self {
        let (grid, blank) = self.grid.slide(self.blank as usize, dir);
        let g = self.g + 1;
        State {
            grid,
            blank: blank as u8,
            g,
            h: 0,
            f: g,
            parent: Some(id),
            direction: Some(dir),
            expanded: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Blank coordinates as `(row, col)`.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank as usize / SIZE, self.blank as usize % SIZE)
    }

    pub fn g(&self) -> u16 {
        self.g
    }

    pub fn h(&self) -> u16 {
        self.h
    }

    pub fn f(&self) -> u16 {
        self.f
    }

    pub fn set_h(&mut self, h: u16) {
        self.h = h;
        self.f = self.g + h;
    }

    /// Attach this state to a cheaper parent found after it was generated. The grid and
    /// `h` are kept; `g` and `f` follow the new route.
    pub fn reparent(&mut self, parent: StateId, dir: Direction, g: u16) {
        self.parent = Some(parent);
        self.direction = Some(dir);
        self.g = g;
        self.f = g + self.h;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn mark_expanded(&mut self) {
        self.expanded = true;
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// The move that produced this state from its parent.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        Grid::legal_moves_from(self.blank as usize)
    }

    pub fn is_goal(&self, goal: &Grid) -> bool {
        self.grid == *goal
    }

    pub fn key(&self) -> u64 {
        self.grid.canonical_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let grid: Grid = "123406758".parse().unwrap();
        let root = State::root(grid);
        assert_eq!(root.blank(), (1, 1));
        assert_eq!(root.g(), 0);
        assert_eq!(root.f(), root.g() + root.h());
        assert_eq!(root.parent(), None);
        assert_eq!(root.direction(), None);
    }

    #[test]
    fn test_child_copies_grid() {
        let grid: Grid = "123406758".parse().unwrap();
        let root = State::root(grid);
        let child = root.child(StateId(0), Direction::Up);

        assert_eq!(*root.grid(), grid);
        assert_eq!(*child.grid(), "103426758".parse::<Grid>().unwrap());
        assert_eq!(child.blank(), (0, 1));
        assert_eq!(child.g(), 1);
        assert_eq!(child.f(), child.g() + child.h());
        assert_eq!(child.parent(), Some(StateId(0)));
        assert_eq!(child.direction(), Some(Direction::Up));
    }

    #[test]
    fn test_set_h_updates_f() {
        let mut state = State::root(Grid::solved()).child(StateId(0), Direction::Left);
        state.set_h(3);
        assert_eq!(state.h(), 3);
        assert_eq!(state.f(), 4);
        state.set_h(1);
        assert_eq!(state.f(), state.g() + state.h());
    }

    #[test]
    fn test_reparent_keeps_grid_and_h() {
        let root = State::root(Grid::solved());
        let mut state = root.child(StateId(0), Direction::Up).child(StateId(1), Direction::Left);
        state.set_h(4);
        let grid = *state.grid();

        state.reparent(StateId(7), Direction::Right, 1);
        assert_eq!(*state.grid(), grid);
        assert_eq!(state.g(), 1);
        assert_eq!(state.h(), 4);
        assert_eq!(state.f(), 5);
        assert_eq!(state.parent(), Some(StateId(7)));
        assert_eq!(state.direction(), Some(Direction::Right));
        assert!(!state.is_expanded());
        state.mark_expanded();
        assert!(state.is_expanded());
    }

    #[test]
    fn test_legal_moves_follow_blank() {
        let root = State::root(Grid::solved());
        assert_eq!(root.legal_moves().as_slice(), &[Direction::Up, Direction::Left]);

        let child = root.child(StateId(0), Direction::Up);
        assert_eq!(
            child.legal_moves().as_slice(),
            &[Direction::Up, Direction::Down, Direction::Left]
        );
    }

    #[test]
    fn test_is_goal() {
        let root = State::root(Grid::solved());
        assert!(root.is_goal(&Grid::solved()));
        let child = root.child(StateId(0), Direction::Up);
        assert!(!child.is_goal(&Grid::solved()));
        assert_ne!(child.key(), root.key());
    }
}
