use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        let side = i32::from(grid.side);
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns the neighbouring position one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus the length it is trimmed back to after every move.
///
/// The front of the body is the head (most recently appended), the back is
/// the oldest segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    target_length: usize,
}

impl Snake {
    /// Creates a coiled snake: `length` segments stacked on `start`.
    ///
    /// The stack unfolds one cell per tick once the snake starts moving.
    #[must_use]
    pub fn coiled(start: Position, length: usize) -> Self {
        debug_assert!(length > 0);

        Self {
            body: std::iter::repeat(start).take(length).collect(),
            target_length: length,
        }
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        let target_length = segments.len();
        Self {
            body: VecDeque::from(segments),
            target_length,
        }
    }

    /// Pushes a new head. The body is one segment too long until trimmed.
    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Lets the next trim keep one more segment.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Drops tail segments until the body is back at its target length.
    ///
    /// Returns how many segments were removed.
    pub fn trim(&mut self) -> usize {
        let mut removed = 0;
        while self.body.len() > self.target_length {
            let _ = self.body.pop_back();
            removed += 1;
        }
        removed
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the oldest segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the length the body is trimmed to.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
