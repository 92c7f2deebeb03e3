use std::io;
use std::path::PathBuf;

use clap::Parser;
use grid_snake::app::App;
use grid_snake::audio::{CueSink, Silent, TerminalBell};
use grid_snake::config::{Difficulty, GridSize};
use grid_snake::game::SnakeSimulation;
use grid_snake::input::InputHandler;
use grid_snake::logging;
use grid_snake::score::{HighScoreStore, JsonFileStore, MemoryStore};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Tick speed; changing it in game restarts the run.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Do not ring the terminal bell.
    #[arg(long)]
    mute: bool,

    /// Seed for target placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// High score file (defaults to the per-user data directory).
    #[arg(long = "scores-file", value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save", conflicts_with = "scores_file")]
    no_save: bool,

    /// Log file (defaults to the per-user data directory).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Warnings must be printed before the terminal switches to raw mode.
    match logging::init(cli.log_file.clone()) {
        Ok(path) => info!(path = %path.display(), "logging initialised"),
        Err(error) => eprintln!("Logging disabled: {error}"),
    }

    let audio: Box<dyn CueSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stdout())
    };

    if cli.no_save {
        run(&cli, MemoryStore::default(), audio)
    } else {
        let store = cli
            .scores_file
            .clone()
            .map_or_else(JsonFileStore::at_default_location, JsonFileStore::new);
        info!(path = %store.path().display(), "using score file");
        run(&cli, store, audio)
    }
}

fn run<S: HighScoreStore>(cli: &Cli, store: S, audio: Box<dyn CueSink>) -> io::Result<()> {
    let grid = GridSize::default();
    let high_score = store.load();
    let simulation = match cli.seed {
        Some(seed) => SnakeSimulation::new_with_seed(grid, high_score, seed),
        None => SnakeSimulation::new(grid, high_score),
    };

    let mut app = App::new(simulation, store, audio, cli.difficulty, cli.mute);
    let mut input = InputHandler::new();

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    app.run(&mut session, &mut input)
}
