use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::{GridSize, CELL_WIDTH, GLYPH_CELL, PALETTE};
use crate::game::{SimulationState, SnakeSimulation};
use crate::snake::Position;
use crate::target::CellPicker;
use crate::ui::hud::{render_hud, HudInfo, HudValues};
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_start_hint, render_victory_menu,
};

const HUD_HEIGHT: u16 = 1;

/// Renders the full game frame from immutable simulation state.
pub fn render<P: CellPicker>(frame: &mut Frame<'_>, sim: &SnakeSimulation<P>, info: &HudInfo) {
    let area = frame.area();
    let grid = sim.grid();
    let (field_width, field_height) = field_size(grid);

    if area.width < field_width || area.height < field_height + HUD_HEIGHT {
        render_too_small(frame, area, field_width, field_height + HUD_HEIGHT);
        return;
    }

    let [column] = Layout::horizontal([Constraint::Length(field_width)])
        .flex(Flex::Center)
        .areas(area);
    let [play_area, hud_area] = Layout::vertical([
        Constraint::Length(field_height),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    let block = Block::bordered()
        .border_style(Style::new().fg(PALETTE.border_fg))
        .style(Style::new().bg(PALETTE.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if let Some(target) = sim.target() {
        paint_cell(frame, inner, grid, target, Style::new().fg(PALETTE.target));
    }
    render_snake(frame, inner, sim);

    render_hud(
        frame,
        hud_area,
        HudValues {
            score: sim.score(),
            high_score: sim.high_score(),
            new_record: sim.is_new_high_score(),
            length: sim.snake().len(),
        },
        info,
    );

    match sim.state() {
        SimulationState::GameOver => render_game_over_menu(
            frame,
            play_area,
            sim.score(),
            sim.high_score(),
            sim.is_new_high_score(),
            sim.death_reason(),
        ),
        SimulationState::Won => render_victory_menu(frame, play_area, sim.score()),
        SimulationState::Running if sim.is_waiting_for_input() => {
            render_start_hint(frame, play_area, sim.high_score());
        }
        SimulationState::Running if info.paused => render_pause_menu(frame, play_area),
        SimulationState::Running => {}
    }
}

/// Returns the bordered field size in terminal cells.
#[must_use]
pub fn field_size(grid: GridSize) -> (u16, u16) {
    (
        grid.side.saturating_mul(CELL_WIDTH).saturating_add(2),
        grid.side.saturating_add(2),
    )
}

fn render_snake<P: CellPicker>(frame: &mut Frame<'_>, inner: Rect, sim: &SnakeSimulation<P>) {
    let grid = sim.grid();
    let body_style = Style::new().fg(PALETTE.snake_body);

    for segment in sim.snake().segments().skip(1) {
        paint_cell(frame, inner, grid, *segment, body_style);
    }

    // Painted last so it stays visible while the start body is coiled.
    let head_style = Style::new()
        .fg(PALETTE.snake_head)
        .add_modifier(Modifier::BOLD);
    paint_cell(frame, inner, grid, sim.snake().head(), head_style);
}

fn paint_cell(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, position: Position, style: Style) {
    let Some((x, y)) = logical_to_terminal(inner, grid, position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    for column in 0..CELL_WIDTH {
        buffer.set_string(x.saturating_add(column), y, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16) {
    let message = format!("Terminal too small: need {width}x{height}");
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(PALETTE.hud_value)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{Difficulty, GridSize, GLYPH_CELL};
    use crate::game::SnakeSimulation;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};
    use crate::target::SequencePicker;
    use crate::ui::hud::HudInfo;

    use super::{field_size, logical_to_terminal, render};

    const INFO: HudInfo = HudInfo {
        difficulty: Difficulty::Medium,
        paused: false,
        muted: false,
    };

    #[test]
    fn field_is_two_columns_per_cell_plus_border() {
        assert_eq!(field_size(GridSize::square(20)), (42, 22));
    }

    #[test]
    fn cells_map_inside_inner_area() {
        let inner = Rect::new(1, 1, 8, 4);
        let grid = GridSize::square(4);

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(3, 3)),
            Some((7, 4))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(4, 0)), None);
    }

    #[test]
    fn frame_paints_head_and_target() {
        let sim = SnakeSimulation::from_layout(
            GridSize::square(4),
            Snake::from_segments(vec![Position::new(1, 1), Position::new(0, 1)]),
            Direction::Right,
            Position::new(3, 3),
            SequencePicker::first_free(),
        );
        let mut terminal =
            Terminal::new(TestBackend::new(10, 7)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &sim, &INFO))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        // Field is 10x6 at the top-left; inner area starts at (1, 1).
        assert_eq!(buffer[(3, 2)].symbol(), GLYPH_CELL);
        assert_eq!(buffer[(7, 4)].symbol(), GLYPH_CELL);
        assert_eq!(buffer[(5, 2)].symbol(), " ");
    }

    #[test]
    fn small_terminal_gets_resize_hint() {
        let sim = SnakeSimulation::new_with_seed(GridSize::square(20), 0, 3);
        let mut terminal =
            Terminal::new(TestBackend::new(20, 5)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &sim, &INFO))
            .expect("draw should succeed");

        let first_row: String = (0..20)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_owned())
            .collect();
        assert!(first_row.contains("Terminal"));
    }
}
