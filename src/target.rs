use rand::rngs::StdRng;
use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Source of target placement choices.
///
/// Given the number of free cells, returns the index of the one to use.
/// Implementations must return a value below `candidates`; out-of-range
/// values are clamped by the caller.
pub trait CellPicker {
    fn pick(&mut self, candidates: usize) -> usize;
}

impl CellPicker for StdRng {
    fn pick(&mut self, candidates: usize) -> usize {
        self.gen_range(0..candidates)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequencePicker {
    picks: Vec<usize>,
    next: usize,
}

impl SequencePicker {
    #[must_use]
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }

    /// Always picks the first free cell in row-major order.
    #[must_use]
    pub fn first_free() -> Self {
        Self::new(vec![0])
    }
}

impl CellPicker for SequencePicker {
    fn pick(&mut self, candidates: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }

        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick.min(candidates.saturating_sub(1))
    }
}

/// Lists every cell not covered by the snake, row by row.
#[must_use]
pub fn free_cells(grid: GridSize, snake: &Snake) -> Vec<Position> {
    let side = i32::from(grid.side);
    let mut candidates = Vec::with_capacity(grid.total_cells().saturating_sub(snake.len()));

    for y in 0..side {
        for x in 0..side {
            let position = Position::new(x, y);
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}

/// Chooses a free cell for the next target, or `None` on a full grid.
#[must_use]
pub fn spawn_position<P: CellPicker + ?Sized>(
    picker: &mut P,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let candidates = free_cells(grid, snake);
    if candidates.is_empty() {
        return None;
    }

    let index = picker.pick(candidates.len()).min(candidates.len() - 1);
    Some(candidates[index])
}
