use rand::Rng;

use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Place an apple on a random free cell
///
/// Uniform rejection sampling: candidates occupied by the snake are
/// discarded and resampled. Returns `None` when the snake covers the whole
/// board, so a full board terminates the session instead of spinning here.
pub fn place<R: Rng>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    if snake.len() >= grid.cell_count() {
        return None;
    }

    loop {
        let cell = Cell::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
}
