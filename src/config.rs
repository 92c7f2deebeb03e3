use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;

/// Side length of the square playing field, in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub side: u16,
}

impl GridSize {
    /// Creates a square grid with `side` cells per axis.
    #[must_use]
    pub fn square(side: u16) -> Self {
        debug_assert!(side > 0, "grid side must be positive");
        Self { side }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }

    /// Returns the cell the snake starts from.
    #[must_use]
    pub fn start_cell(self) -> (i32, i32) {
        let centre = i32::from(self.side / 2);
        (centre, centre)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Tick cadence tiers. Changing the tier restarts the run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum Difficulty {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Difficulty {
    /// Returns the wall-clock time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        let millis = match self {
            Self::Slow => 150,
            Self::Medium => 100,
            Self::Fast => 50,
        };
        Duration::from_millis(millis)
    }

    /// Returns the next tier, wrapping from fast back to slow.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        };
        f.write_str(label)
    }
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub target: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub banner: Color,
}

/// Green snake and red apple on black.
pub const PALETTE: Palette = Palette {
    snake_head: Color::Green,
    snake_body: Color::LightGreen,
    target: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::DarkGray,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    banner: Color::White,
};

/// Glyph used to paint a single terminal column of a cell.
pub const GLYPH_CELL: &str = "█";

/// Terminal columns per grid cell, so cells look roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Default side length of the playing field.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Body length of a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 2;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "GRID_SNAKE_LOG";

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "grid-snake";
