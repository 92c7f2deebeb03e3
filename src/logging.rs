use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{APP_DIR_NAME, LOG_FILTER_ENV};

const LOG_FILE_NAME: &str = "grid-snake.log";
const DEFAULT_FILTER: &str = "info";

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Installs the global subscriber, appending to `path`.
///
/// The terminal belongs to the game while it runs, so logs never go to
/// stdout or stderr. The filter comes from `GRID_SNAKE_LOG` and defaults to
/// `info`.
pub fn init(path: Option<PathBuf>) -> io::Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)?;

    Ok(path)
}
