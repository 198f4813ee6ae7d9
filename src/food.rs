use crate::grid::{Bounds, Cell};
use crate::snake::Snake;
use ahash::AHashSet;
use rand::Rng;
use rand::seq::SliceRandom;

/// Random draws tried before falling back to scanning for free cells.
const MAX_DRAWS: usize = 64;

/// Picks a grid-aligned cell that the snake does not cover.
///
/// Each axis is drawn uniformly over `[0, dimension - unit]` and rounded to the
/// nearest multiple of `unit`. Draws landing on the body are thrown away. Once
/// the board is crowded enough that [`MAX_DRAWS`] draws all miss, the free cells
/// are collected and one is chosen directly. Returns `None` only when the body
/// covers every cell.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, snake: &Snake) -> Option<Cell> {
    for _ in 0..MAX_DRAWS {
        let cell = Cell::new(snap(rng, bounds.max_x(), bounds.unit), snap(rng, bounds.max_y(), bounds.unit));
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    let occupied: AHashSet<Cell> = snake.cells().collect();
    let free: Vec<Cell> = bounds.cells().filter(|c| !occupied.contains(c)).collect();
    free.choose(rng).copied()
}

fn snap<R: Rng + ?Sized>(rng: &mut R, max: i32, unit: i32) -> i32 {
    let raw = rng.gen_range(0.0..=max as f64);
    (raw / unit as f64).round() as i32 * unit
}
