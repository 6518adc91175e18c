//! Best-score persistence
//!
//! The score is a single non-negative integer stored as text. A missing or
//! garbled file reads as 0; write failures are logged and otherwise ignored so
//! the game loop never stalls on disk trouble.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HighScoreError;

/// Where the simulation reads and writes its best score
pub trait HighScoreStore {
    /// Current persisted best score (0 when nothing usable is stored)
    fn load(&self) -> u32;
    /// Overwrite the persisted best score
    fn save(&mut self, score: u32);
}

/// Plain-text file holding one integer
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score, surfacing what went wrong
    pub fn read(&self) -> Result<u32, HighScoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(text.trim().parse::<u32>()?)
    }

    /// Write the score, surfacing what went wrong
    pub fn write(&self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(HighScoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file at {}, starting fresh", self.path.display());
                0
            }
            Err(err) => {
                log::warn!("Ignoring high score file {}: {}", self.path.display(), err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        match self.write(score) {
            Ok(()) => log::info!("High score {} saved to {}", score, self.path.display()),
            Err(err) => log::warn!("Could not save high score: {}", err),
        }
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    pub score: u32,
    /// Number of times `save` was called
    pub saves: u32,
}

impl MemoryHighScore {
    pub fn new(score: u32) -> Self {
        Self { score, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
        self.saves += 1;
    }
}
