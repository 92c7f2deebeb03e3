use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Movement directions, including the idle state before the first input.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

/// Movement axis of a non-idle direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Returns the unit step for one tick, `(0, 0)` when idle.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// Returns the axis of motion, or `None` when idle.
    #[must_use]
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Up | Self::Down => Some(Axis::Vertical),
            Self::Left | Self::Right => Some(Axis::Horizontal),
            Self::None => None,
        }
    }
}

/// Returns whether `next` may replace `current` (it must change axis).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    match (current.axis(), next.axis()) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(current_axis), Some(next_axis)) => current_axis != next_axis,
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Pause,
    CycleDifficulty,
    SelectDifficulty(Difficulty),
    Quit,
}

/// Translates a key event into a game intent.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::Pause,
        KeyCode::Tab => GameInput::CycleDifficulty,
        KeyCode::Char('1') => GameInput::SelectDifficulty(Difficulty::Slow),
        KeyCode::Char('2') => GameInput::SelectDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => GameInput::SelectDifficulty(Difficulty::Fast),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Keyboard source backed by crossterm's event queue.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for a key press and maps it.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the event has no
    /// game meaning (mouse, resize, unmapped keys).
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{direction_change_is_valid, map_key, Axis, Direction, GameInput};
    use crate::config::Difficulty;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn deltas_are_unit_steps() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::None.delta(), (0, 0));
        assert_eq!(Direction::Left.axis(), Some(Axis::Horizontal));
        assert_eq!(Direction::None.axis(), None);
    }

    #[test]
    fn direction_change_requires_axis_switch() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Up, Direction::Up));
        assert!(!direction_change_is_valid(Direction::Right, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Left, Direction::Down));
    }

    #[test]
    fn idle_accepts_any_cardinal_direction() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(direction_change_is_valid(Direction::None, direction));
        }
        assert!(!direction_change_is_valid(Direction::None, Direction::None));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(GameInput::Direction(Direction::Right))
        );
        assert_eq!(
            map_key(press(KeyCode::Down)),
            Some(GameInput::Direction(Direction::Down))
        );
    }

    #[test]
    fn control_keys_map_to_commands() {
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key(press(KeyCode::Tab)), Some(GameInput::CycleDifficulty));
        assert_eq!(
            map_key(press(KeyCode::Char('3'))),
            Some(GameInput::SelectDifficulty(Difficulty::Fast))
        );
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
    }
}
