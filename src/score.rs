use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::APP_DIR_NAME;

const SCORE_FILE_NAME: &str = "scores.json";

/// Failure reading or writing the score file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key/value capability holding the persisted high score.
///
/// Implementations swallow their own failures: a broken store must never
/// interrupt a running game.
pub trait HighScoreStore {
    /// Returns the stored high score, or 0 when none is available.
    fn load(&self) -> u32;

    /// Persists a new high score.
    fn save(&mut self, score: u32);
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score kept as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default per-user data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match load_from_path(&self.path) {
            Ok(score) => {
                debug!(path = %self.path.display(), score, "loaded high score");
                score
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(error) = save_to_path(&self.path, score) {
            warn!(path = %self.path.display(), %error, score, "failed to save high score");
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    #[must_use]
    pub fn with_score(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.high_score
    }

    fn save(&mut self, score: u32) {
        self.high_score = score;
    }
}

/// Reads the high score, treating a missing file as a first run.
pub fn load_from_path(path: &Path) -> Result<u32, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

/// Writes the high score, creating parent directories when needed.
pub fn save_to_path(path: &Path, score: u32) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}
