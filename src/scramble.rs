use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Direction, Grid};

/// Seeded PRNG so a given seed always produces the same scramble.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Slide the blank `steps` times at random starting from `goal`, never immediately undoing the
/// previous slide. The result is always solvable back to `goal`.
pub fn scramble<R: Rng + ?Sized>(goal: &Grid, steps: usize, rng: &mut R) -> Grid {
    let mut grid = *goal;
    let mut blank = grid.blank_index();
    let mut last: Option<Direction> = None;

    for _ in 0..steps {
        let moves: ArrayVec<Direction, 4> = Grid::legal_moves_from(blank)
            .into_iter()
            .filter(|dir| Some(dir.reverse()) != last)
            .collect();
        // Every cell has at least two neighbours, so one non-reversing move always remains.
        let Some(&dir) = moves.choose(rng) else {
            break;
        };
        (grid, blank) = grid.slide(blank, dir);
        last = Some(dir);
    }

    grid
}
