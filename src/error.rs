//! Error types for the persistence edges
//!
//! The simulation itself never fails; these only surface from file I/O and
//! are recovered by the callers in `highscores` and `settings`.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Reading or writing the best-score file failed
#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is not a number: {0}")]
    Parse(#[from] ParseIntError),
}

/// Reading, parsing or writing the settings file failed
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
