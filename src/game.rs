use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Position, Snake};
use crate::target::{spawn_position, CellPicker};

/// Run state of the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SimulationState {
    Running,
    GameOver,
    /// The body covers every cell, so no target can spawn.
    Won,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Side effects raised by a tick, in the order they happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    TargetConsumed { at: Position, score: u32 },
    NewHighScore(u32),
    GameOver(DeathReason),
    GridFilled,
}

/// Outcome of one call to [`SnakeSimulation::tick`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TickResult {
    pub state: SimulationState,
    pub events: Vec<GameEvent>,
}

impl TickResult {
    fn quiet(state: SimulationState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    /// Returns the score to persist when this tick set a new record.
    #[must_use]
    pub fn new_high_score(&self) -> Option<u32> {
        self.events.iter().find_map(|event| match event {
            GameEvent::NewHighScore(score) => Some(*score),
            _ => None,
        })
    }
}

/// Complete state of one snake game, advanced one discrete step at a time.
///
/// The simulation knows nothing about wall-clock time, terminals or files:
/// a driver calls [`tick`](Self::tick) on a schedule, forwards input through
/// [`set_direction`](Self::set_direction) and reads state back for drawing.
#[derive(Debug, Clone)]
pub struct SnakeSimulation<P: CellPicker = StdRng> {
    grid: GridSize,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    target: Option<Position>,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    state: SimulationState,
    death_reason: Option<DeathReason>,
    moves: u64,
    picker: P,
}

impl SnakeSimulation<StdRng> {
    /// Creates a simulation with entropy-seeded target placement.
    #[must_use]
    pub fn new(grid: GridSize, high_score: u32) -> Self {
        Self::with_picker(grid, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, high_score: u32, seed: u64) -> Self {
        Self::with_picker(grid, high_score, StdRng::seed_from_u64(seed))
    }
}

impl<P: CellPicker> SnakeSimulation<P> {
    /// Creates a freshly reset simulation placing targets through `picker`.
    #[must_use]
    pub fn with_picker(grid: GridSize, high_score: u32, picker: P) -> Self {
        let start = grid.start_cell();
        let mut simulation = Self {
            grid,
            snake: Snake::coiled(Position::new(start.0, start.1), INITIAL_SNAKE_LENGTH),
            direction: Direction::None,
            pending_direction: Direction::None,
            target: None,
            score: 0,
            high_score,
            new_high_score: false,
            state: SimulationState::Running,
            death_reason: None,
            moves: 0,
            picker,
        };
        simulation.reset();
        simulation
    }

    /// Creates a running simulation from an arbitrary mid-game layout.
    ///
    /// `direction` counts as already committed, so reversal rules apply to
    /// the very first `set_direction` call.
    #[must_use]
    pub fn from_layout(
        grid: GridSize,
        snake: Snake,
        direction: Direction,
        target: Position,
        picker: P,
    ) -> Self {
        Self {
            grid,
            snake,
            direction,
            pending_direction: direction,
            target: Some(target),
            score: 0,
            high_score: 0,
            new_high_score: false,
            state: SimulationState::Running,
            death_reason: None,
            moves: 0,
            picker,
        }
    }

    /// Starts a new run. The high score is kept.
    pub fn reset(&mut self) {
        let start = self.grid.start_cell();
        self.snake = Snake::coiled(Position::new(start.0, start.1), INITIAL_SNAKE_LENGTH);
        self.direction = Direction::None;
        self.pending_direction = Direction::None;
        self.score = 0;
        self.new_high_score = false;
        self.state = SimulationState::Running;
        self.death_reason = None;
        self.moves = 0;
        self.target = spawn_position(&mut self.picker, self.grid, &self.snake);

        if self.target.is_none() {
            self.state = SimulationState::Won;
        }
    }

    /// Buffers a direction for the next tick.
    ///
    /// Requests on the axis the snake is already travelling, or already
    /// queued to travel, are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state != SimulationState::Running {
            return;
        }

        if direction_change_is_valid(self.direction, requested)
            && direction_change_is_valid(self.pending_direction, requested)
        {
            self.pending_direction = requested;
        }
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickResult {
        if self.state != SimulationState::Running {
            return TickResult::quiet(self.state);
        }

        self.direction = self.pending_direction;
        if self.direction == Direction::None {
            return TickResult::quiet(self.state);
        }

        let head = self.snake.head().stepped(self.direction);
        if !head.is_within_bounds(self.grid) {
            return self.finish(DeathReason::WallCollision);
        }

        // The tail is still in the body here, so chasing it is fatal.
        if self.snake.occupies(head) {
            return self.finish(DeathReason::SelfCollision);
        }

        self.moves += 1;
        self.snake.push_head(head);

        let mut events = Vec::new();
        if self.target == Some(head) {
            self.consume_target(head, &mut events);
        }

        self.snake.trim();

        TickResult {
            state: self.state,
            events,
        }
    }

    fn consume_target(&mut self, at: Position, events: &mut Vec<GameEvent>) {
        self.score += 1;
        self.snake.grow();
        events.push(GameEvent::TargetConsumed {
            at,
            score: self.score,
        });

        self.target = spawn_position(&mut self.picker, self.grid, &self.snake);
        if self.target.is_none() {
            self.state = SimulationState::Won;
            events.push(GameEvent::GridFilled);
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            events.push(GameEvent::NewHighScore(self.score));
        }
    }

    fn finish(&mut self, reason: DeathReason) -> TickResult {
        self.state = SimulationState::GameOver;
        self.death_reason = Some(reason);

        TickResult {
            state: self.state,
            events: vec![GameEvent::GameOver(reason)],
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Direction used by the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next tick will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once this run has beaten the high score it started with.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Number of ticks in this run that moved the snake.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// True until the first direction has been committed by a tick.
    #[must_use]
    pub fn is_waiting_for_input(&self) -> bool {
        self.state == SimulationState::Running && self.direction == Direction::None
    }
}
