use std::io;
use std::ops::ControlFlow;
use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::audio::{AudioCue, CueSink};
use crate::config::Difficulty;
use crate::game::{GameEvent, SimulationState, SnakeSimulation, TickResult};
use crate::input::{GameInput, InputHandler};
use crate::renderer;
use crate::score::HighScoreStore;
use crate::target::CellPicker;
use crate::terminal_runtime::TerminalSession;
use crate::ui::hud::HudInfo;

/// Drives one simulation: the only caller of `tick()`, and the bridge to the
/// score store and the audio sink.
pub struct App<S, A, P = StdRng>
where
    S: HighScoreStore,
    A: CueSink,
    P: CellPicker,
{
    simulation: SnakeSimulation<P>,
    store: S,
    audio: A,
    difficulty: Difficulty,
    paused: bool,
    muted: bool,
}

impl<S, A, P> App<S, A, P>
where
    S: HighScoreStore,
    A: CueSink,
    P: CellPicker,
{
    #[must_use]
    pub fn new(
        simulation: SnakeSimulation<P>,
        store: S,
        audio: A,
        difficulty: Difficulty,
        muted: bool,
    ) -> Self {
        Self {
            simulation,
            store,
            audio,
            difficulty,
            paused: false,
            muted,
        }
    }

    #[must_use]
    pub fn simulation(&self) -> &SnakeSimulation<P> {
        &self.simulation
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn hud_info(&self) -> HudInfo {
        HudInfo {
            difficulty: self.difficulty,
            paused: self.paused,
            muted: self.muted,
        }
    }

    /// Applies one input intent. Breaks when the player quits.
    pub fn handle_input(&mut self, input: GameInput) -> ControlFlow<()> {
        match input {
            GameInput::Quit => return ControlFlow::Break(()),
            GameInput::Direction(direction) => {
                if !self.paused {
                    self.simulation.set_direction(direction);
                }
            }
            GameInput::Restart => {
                if self.simulation.state() != SimulationState::Running || self.paused {
                    self.restart();
                }
            }
            GameInput::Pause => {
                if self.simulation.state() == SimulationState::Running
                    && !self.simulation.is_waiting_for_input()
                {
                    self.paused = !self.paused;
                }
            }
            GameInput::CycleDifficulty => self.change_difficulty(self.difficulty.next()),
            GameInput::SelectDifficulty(difficulty) => self.change_difficulty(difficulty),
        }

        ControlFlow::Continue(())
    }

    /// Runs one scheduled tick and forwards its events.
    pub fn step(&mut self) -> Option<TickResult> {
        if self.paused {
            return None;
        }

        let result = self.simulation.tick();
        for event in &result.events {
            self.dispatch(event);
        }

        Some(result)
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if let Some(cue) = AudioCue::for_event(event) {
            self.audio.play(cue);
        }

        match *event {
            GameEvent::TargetConsumed { at, score } => {
                debug!(x = at.x, y = at.y, score, "target consumed");
            }
            GameEvent::NewHighScore(score) => {
                info!(score, "new high score");
                self.store.save(score);
            }
            GameEvent::GameOver(reason) => {
                info!(
                    ?reason,
                    score = self.simulation.score(),
                    length = self.simulation.snake().len(),
                    moves = self.simulation.moves(),
                    "game over"
                );
            }
            GameEvent::GridFilled => {
                info!(score = self.simulation.score(), "grid filled");
            }
        }
    }

    fn restart(&mut self) {
        info!(difficulty = %self.difficulty, "starting new run");
        self.paused = false;
        self.simulation.reset();
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }

        info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        self.difficulty = difficulty;
        self.restart();
    }

    /// Runs the game loop until the player quits.
    ///
    /// Input is polled with a timeout that ends at the next tick deadline, so
    /// direction changes land between ticks and ticks never overlap.
    pub fn run(&mut self, session: &mut TerminalSession, input: &mut InputHandler) -> io::Result<()> {
        info!(
            difficulty = %self.difficulty,
            high_score = self.simulation.high_score(),
            "game loop started"
        );
        let mut next_tick = Instant::now() + self.difficulty.tick_interval();

        loop {
            let hud_info = self.hud_info();
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, &self.simulation, &hud_info))?;

            let timeout = next_tick.saturating_duration_since(Instant::now());
            if let Some(game_input) = input.poll_input(timeout)? {
                if self.handle_input(game_input).is_break() {
                    break;
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                let _ = self.step();
                next_tick = now + self.difficulty.tick_interval();
            }
        }

        info!(high_score = self.simulation.high_score(), "game loop finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use crate::audio::{AudioCue, CueSink};
    use crate::config::{Difficulty, GridSize};
    use crate::game::{SimulationState, SnakeSimulation};
    use crate::input::{Direction, GameInput};
    use crate::score::{HighScoreStore, MemoryStore};
    use crate::snake::{Position, Snake};
    use crate::target::SequencePicker;

    use super::App;

    #[derive(Debug, Default)]
    struct RecordingSink {
        cues: Vec<AudioCue>,
    }

    impl CueSink for RecordingSink {
        fn play(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }
    }

    fn app_with_target_ahead() -> App<MemoryStore, RecordingSink, SequencePicker> {
        let simulation = SnakeSimulation::from_layout(
            GridSize::square(5),
            Snake::from_segments(vec![Position::new(1, 2), Position::new(0, 2)]),
            Direction::Right,
            Position::new(2, 2),
            SequencePicker::first_free(),
        );

        App::new(
            simulation,
            MemoryStore::default(),
            RecordingSink::default(),
            Difficulty::Medium,
            false,
        )
    }

    #[test]
    fn new_high_score_is_persisted_and_cued() {
        let mut app = app_with_target_ahead();

        let result = app.step().expect("unpaused app should tick");

        assert_eq!(result.new_high_score(), Some(1));
        assert_eq!(app.store().load(), 1);
        assert_eq!(app.audio.cues, vec![AudioCue::TargetConsumed]);
    }

    #[test]
    fn game_over_plays_cue() {
        let mut app = app_with_target_ahead();
        assert!(app
            .handle_input(GameInput::Direction(Direction::Up))
            .is_continue());
        app.step();
        app.step();
        app.step();

        assert_eq!(app.simulation().state(), SimulationState::GameOver);
        assert_eq!(app.audio.cues, vec![AudioCue::GameOver]);
    }

    #[test]
    fn pause_holds_ticks() {
        let mut app = app_with_target_ahead();

        assert!(app.handle_input(GameInput::Pause).is_continue());
        assert!(app.is_paused());
        assert!(app.step().is_none());
        assert_eq!(app.simulation().score(), 0);

        assert!(app.handle_input(GameInput::Pause).is_continue());
        assert!(app.step().is_some());
        assert_eq!(app.simulation().score(), 1);
    }

    #[test]
    fn difficulty_change_resets_the_run() {
        let mut app = app_with_target_ahead();
        app.step();
        assert_eq!(app.simulation().score(), 1);

        assert!(app
            .handle_input(GameInput::SelectDifficulty(Difficulty::Fast))
            .is_continue());

        assert_eq!(app.difficulty(), Difficulty::Fast);
        assert_eq!(app.simulation().score(), 0);
        assert_eq!(app.simulation().high_score(), 1);
        assert!(app.simulation().is_waiting_for_input());
    }

    #[test]
    fn restart_only_after_run_ends() {
        let mut app = app_with_target_ahead();
        app.step();

        assert!(app.handle_input(GameInput::Restart).is_continue());
        assert_eq!(app.simulation().score(), 1);

        assert!(app
            .handle_input(GameInput::Direction(Direction::Up))
            .is_continue());
        app.step();
        app.step();
        app.step();
        assert_eq!(app.simulation().state(), SimulationState::GameOver);

        assert!(app.handle_input(GameInput::Restart).is_continue());
        assert_eq!(app.simulation().state(), SimulationState::Running);
        assert_eq!(app.simulation().score(), 0);
    }

    #[test]
    fn quit_breaks_the_loop() {
        let mut app = app_with_target_ahead();

        assert_eq!(app.handle_input(GameInput::Quit), ControlFlow::Break(()));
        assert_eq!(
            app.handle_input(GameInput::CycleDifficulty),
            ControlFlow::Continue(())
        );
        assert_eq!(app.difficulty(), Difficulty::Fast);
    }
}
