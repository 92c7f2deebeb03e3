use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::PALETTE;
use crate::game::DeathReason;

/// Hint shown until the first direction key is pressed.
pub fn render_start_hint(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let lines = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("Arrows/WASD to start"),
        Line::from("[1][2][3]/[Tab] Speed"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " snake ", lines, 70, 45);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " pause ", lines, 60, 35);
}

/// Draws the game-over banner with cause and record flag.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    is_record: bool,
    death_reason: Option<DeathReason>,
) {
    let lines = vec![
        Line::from("Game Over!").style(banner_style()),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(if is_record { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " game over ", lines, 80, 60);
}

/// Draws the banner for a snake that filled the whole grid.
pub fn render_victory_menu(frame: &mut Frame<'_>, area: Rect, score: u32) {
    let lines = vec![
        Line::from("You Win!").style(banner_style()),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " grid filled ", lines, 70, 45);
}

fn banner_style() -> Style {
    Style::new().fg(PALETTE.banner).add_modifier(Modifier::BOLD)
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    width_percent: u16,
    height_percent: u16,
) {
    let popup = centered_popup(area, width_percent, height_percent);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
