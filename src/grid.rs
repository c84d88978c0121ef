use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

use crate::error::SolveError;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

const BLANK: u8 = 0;
const KEY_BITS: u32 = 4;
const KEY_MASK: u64 = (1 << KEY_BITS) - 1;

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Enumeration order of legal moves. Among children with equal f-score this decides which
/// optimal solution gets reported.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// A 3x3 board holding each of the values 0..=8 exactly once, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u8; CELLS],
}

impl Grid {
    /// Build a grid from row-major cells, rejecting anything that is not a permutation of 0..=8.
    pub fn new(cells: [u8; CELLS]) -> Result<Self, SolveError> {
        let mut seen = [false; CELLS];
        for (i, &value) in cells.iter().enumerate() {
            if value as usize >= CELLS {
                return Err(SolveError::InvalidGrid(format!(
                    "value {} at position {} is out of range 0-{}",
                    value,
                    i,
                    CELLS - 1
                )));
            }
            if seen[value as usize] {
                return Err(SolveError::InvalidGrid(format!(
                    "duplicate value {} at position {}",
                    value, i
                )));
            }
            seen[value as usize] = true;
        }
        Ok(Grid { cells })
    }

    /// The conventional goal arrangement `1 2 3 / 4 5 6 / 7 8 0`.
    pub fn solved() -> Self {
        Grid {
            cells: [1, 2, 3, 4, 5, 6, 7, 8, BLANK],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Row-major index of the blank.
    pub fn blank_index(&self) -> usize {
        // A valid grid always contains the blank.
        self.cells.iter().position(|&v| v == BLANK).unwrap_or(0)
    }

    /// Coordinates `(row, col)` of every value, indexed by value.
    pub fn positions(&self) -> [(u8, u8); CELLS] {
        let mut positions = [(0, 0); CELLS];
        for (i, &value) in self.cells.iter().enumerate() {
            positions[value as usize] = ((i / SIZE) as u8, (i % SIZE) as u8);
        }
        positions
    }

    /// Pack the nine cells into 4 bits each. Distinct grids always produce distinct keys.
    pub fn canonical_key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |key, &value| (key << KEY_BITS) | value as u64)
    }

    /// Inverse of [`Grid::canonical_key`].
    pub fn from_key(key: u64) -> Result<Self, SolveError> {
        if key >> (KEY_BITS * CELLS as u32) != 0 {
            return Err(SolveError::InvalidGrid(format!(
                "key {:#x} has bits beyond {} cells",
                key, CELLS
            )));
        }
        let mut cells = [0u8; CELLS];
        for (i, cell) in cells.iter_mut().rev().enumerate() {
            *cell = ((key >> (i as u32 * KEY_BITS)) & KEY_MASK) as u8;
        }
        Grid::new(cells)
    }

    /// Blank moves available from `blank` (a row-major index), in [`ALL_DIRECTIONS`] order.
    pub fn legal_moves_from(blank: usize) -> ArrayVec<Direction, 4> {
        let (row, col) = (blank / SIZE, blank % SIZE);
        let mut moves = ArrayVec::new();
        for dir in ALL_DIRECTIONS {
            let legal = match dir {
                Direction::Up => row > 0,
                Direction::Down => row < SIZE - 1,
                Direction::Left => col > 0,
                Direction::Right => col < SIZE - 1,
            };
            if legal {
                moves.push(dir);
            }
        }
        moves
    }

    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        Self::legal_moves_from(self.blank_index())
    }

    /// Slide the blank one step in `dir`, returning the new grid and new blank index.
    /// Panics if the move would leave the board.
    pub fn slide(&self, blank: usize, dir: Direction) -> (Grid, usize) {
        let (dr, dc) = dir.delta();
        let row = (blank / SIZE) as i8 + dr;
        let col = (blank % SIZE) as i8 + dc;
        assert!(
            (0..SIZE as i8).contains(&row) && (0..SIZE as i8).contains(&col),
            "cannot slide blank {} from index {}",
            dir,
            blank
        );

        let target = row as usize * SIZE + col as usize;
        let mut cells = self.cells;
        cells.swap(blank, target);
        (Grid { cells }, target)
    }

    /// Number of tile pairs (blank excluded) that appear in the wrong relative order.
    pub fn inversions(&self) -> usize {
        let tiles: ArrayVec<u8, CELLS> = self
            .cells
            .iter()
            .copied()
            .filter(|&v| v != BLANK)
            .collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether `goal` is reachable from this grid.
    ///
    /// On an odd-width board every slide changes the tile order by an even number of
    /// inversions, so two grids are connected iff their inversion counts share parity.
    pub fn is_solvable_to(&self, goal: &Grid) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }
}

impl FromStr for Grid {
    type Err = SolveError;

    /// Parse nine values, either separated by whitespace/commas (`"1 2 3 4 0 6 7 5 8"`) or
    /// packed as nine digits (`"123406758"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let values: Vec<u8> = if tokens.len() == 1 && tokens[0].len() == CELLS {
            tokens[0]
                .chars()
                .map(|ch| {
                    ch.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                        SolveError::InvalidGrid(format!("invalid character '{}'", ch))
                    })
                })
                .collect::<Result<_, _>>()?
        } else {
            tokens
                .iter()
                .map(|t| {
                    t.parse::<u8>()
                        .map_err(|_| SolveError::InvalidGrid(format!("invalid value '{}'", t)))
                })
                .collect::<Result<_, _>>()?
        };

        let cells: [u8; CELLS] = values.as_slice().try_into().map_err(|_| {
            SolveError::InvalidGrid(format!("expected {} values, got {}", CELLS, values.len()))
        })?;
        Grid::new(cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " -------")?;
        for row in 0..SIZE {
            write!(f, "|")?;
            for col in 0..SIZE {
                match self.get(row, col) {
                    BLANK => write!(f, "  ")?,
                    value => write!(f, " {}", value)?,
                }
            }
            writeln!(f, " |")?;
        }
        writeln!(f, " -------")
    }
}

/// Breadth-first distances from `goal` to every grid reachable from it, keyed by canonical key.
#[cfg(test)]
pub fn bfs_distances(goal: &Grid) -> rustc_hash::FxHashMap<u64, u32> {
    use std::collections::VecDeque;

    let mut distances = rustc_hash::FxHashMap::default();
    let mut queue = VecDeque::new();
    distances.insert(goal.canonical_key(), 0);
    queue.push_back((*goal, goal.blank_index()));

    while let Some((grid, blank)) = queue.pop_front() {
        let dist = distances[&grid.canonical_key()];
        for dir in Grid::legal_moves_from(blank) {
            let (next, next_blank) = grid.slide(blank, dir);
            let key = next.canonical_key();
            if !distances.contains_key(&key) {
                distances.insert(key, dist + 1);
                queue.push_back((next, next_blank));
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_duplicates() {
        let result = Grid::new([1, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(matches!(result, Err(SolveError::InvalidGrid(_))));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let result = Grid::new([1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(matches!(result, Err(SolveError::InvalidGrid(_))));
    }

    #[test]
    fn test_parse_separated_and_packed() {
        let separated: Grid = "1 2 3 4 0 6 7 5 8".parse().unwrap();
        let commas: Grid = "1,2,3,4,0,6,7,5,8".parse().unwrap();
        let packed: Grid = "123406758".parse().unwrap();
        assert_eq!(separated, commas);
        assert_eq!(separated, packed);
        assert_eq!(packed.blank_index(), 4);
        assert_eq!(packed.get(2, 1), 5);
    }

    #[test]
    fn test_parse_errors() {
        assert!("1 2 3".parse::<Grid>().is_err());
        assert!("12340675x".parse::<Grid>().is_err());
        assert!("1 2 3 4 0 6 7 5 5".parse::<Grid>().is_err());
        assert!("1 2 3 4 0 6 7 5 -8".parse::<Grid>().is_err());
    }

    #[test]
    fn test_legal_moves_by_blank_position() {
        let corner: Grid = "012345678".parse().unwrap();
        assert_eq!(
            corner.legal_moves().as_slice(),
            &[Direction::Down, Direction::Right]
        );

        let center: Grid = "123406758".parse().unwrap();
        assert_eq!(center.legal_moves().as_slice(), &ALL_DIRECTIONS);

        let edge: Grid = "123456708".parse().unwrap();
        assert_eq!(
            edge.legal_moves().as_slice(),
            &[Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_slide_swaps_blank() {
        let grid: Grid = "123406758".parse().unwrap();
        let (down, blank) = grid.slide(4, Direction::Down);
        assert_eq!(down, "123456708".parse::<Grid>().unwrap());
        assert_eq!(blank, 7);

        let (back, blank) = down.slide(blank, Direction::Down.reverse());
        assert_eq!(back, grid);
        assert_eq!(blank, 4);
    }

    #[test]
    #[should_panic(expected = "cannot slide blank")]
    fn test_slide_off_board() {
        let grid = Grid::solved();
        grid.slide(grid.blank_index(), Direction::Right);
    }

    #[test]
    fn test_canonical_key_round_trip() {
        let grid: Grid = "876543210".parse().unwrap();
        assert_eq!(grid.canonical_key(), 0x876543210);
        assert_eq!(Grid::from_key(grid.canonical_key()).unwrap(), grid);
    }

    #[test]
    fn test_from_key_rejects_garbage() {
        assert!(Grid::from_key(0).is_err());
        assert!(Grid::from_key(1 << 40).is_err());
    }

    #[test]
    fn test_canonical_key_injective_over_all_permutations() {
        let even = bfs_distances(&Grid::solved());
        let odd = bfs_distances(&"213456780".parse::<Grid>().unwrap());
        // Each parity class holds half of the 9! permutations.
        assert_eq!(even.len(), 181_440);
        assert_eq!(odd.len(), 181_440);

        let mut keys: rustc_hash::FxHashSet<u64> = even.keys().copied().collect();
        keys.extend(odd.keys().copied());
        assert_eq!(keys.len(), 362_880);
        for &key in &keys {
            let grid = Grid::from_key(key).unwrap();
            assert_eq!(grid.canonical_key(), key);
            assert_eq!(grid.is_solvable_to(&Grid::solved()), even.contains_key(&key));
        }
    }

    #[test]
    fn test_parity() {
        let goal = Grid::solved();
        assert_eq!(goal.inversions(), 0);

        let reachable: Grid = "123406758".parse().unwrap();
        assert!(reachable.is_solvable_to(&goal));

        let swapped: Grid = "213456780".parse().unwrap();
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable_to(&goal));
    }

    #[test]
    fn test_display() {
        let grid: Grid = "123406758".parse().unwrap();
        assert_eq!(
            grid.to_string(),
            " -------\n| 1 2 3 |\n| 4   6 |\n| 7 5 8 |\n -------\n"
        );
    }
}
