use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::{Difficulty, PALETTE};

const SEPARATOR: &str = " │ ";

/// Values shown in the HUD that the simulation does not own.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub difficulty: Difficulty,
    pub paused: bool,
    pub muted: bool,
}

/// Per-frame numbers read from the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudValues {
    pub score: u32,
    pub high_score: u32,
    /// This run has beaten the high score it started with.
    pub new_record: bool,
    pub length: usize,
}

/// Draws the single HUD row under the play field.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, values: HudValues, info: &HudInfo) {
    frame.render_widget(
        Paragraph::new(hud_line(values, info)).alignment(Alignment::Center),
        area,
    );
}

fn hud_line(values: HudValues, info: &HudInfo) -> Line<'static> {
    let value = Style::new().fg(PALETTE.hud_value).add_modifier(Modifier::BOLD);
    let muted = Style::new().fg(PALETTE.hud_muted);
    let record = if values.new_record {
        value.fg(PALETTE.snake_head)
    } else {
        value
    };

    let mut spans = vec![
        Span::styled("Score: ", muted),
        Span::styled(values.score.to_string(), record),
        Span::styled(SEPARATOR, muted),
        Span::styled("Hi: ", muted),
        Span::styled(values.high_score.to_string(), record),
        Span::styled(SEPARATOR, muted),
        Span::styled("Length: ", muted),
        Span::styled(values.length.to_string(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled("Speed: ", muted),
        Span::styled(info.difficulty.to_string(), value),
    ];

    if info.muted {
        spans.push(Span::styled(SEPARATOR, muted));
        spans.push(Span::styled("muted", muted));
    }
    if info.paused {
        spans.push(Span::styled(SEPARATOR, muted));
        spans.push(Span::styled("paused", value));
    }

    Line::from(spans)
}
