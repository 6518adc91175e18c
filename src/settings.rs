//! World settings
//!
//! Loaded from an optional JSON file; every field falls back to the defaults
//! in `consts`, so partial files are fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// How the visible window follows the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Window advances on its own; falling below it ends the run
    #[default]
    Scrolling,
    /// Window is centred on the player; no death by falling behind
    CameraFollow,
}

impl ScrollMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollMode::Scrolling => "scrolling",
            ScrollMode::CameraFollow => "camera_follow",
        }
    }
}

/// World and session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World shape ===
    /// Columns per row
    pub grid_width: i32,
    /// Rows shown at once
    pub visible_rows: i32,
    /// Rows in the whole world
    pub total_rows: usize,
    /// Grass rows at the start end of the world
    pub safe_rows: usize,
    /// Player starts on row `total_rows - start_offset`
    pub start_offset: usize,

    // === Pacing ===
    pub scroll_mode: ScrollMode,
    /// Rows per second
    pub scroll_speed: f32,

    // === Session ===
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            visible_rows: VISIBLE_ROWS,
            total_rows: TOTAL_ROWS,
            safe_rows: SAFE_ROWS,
            start_offset: START_OFFSET,

            scroll_mode: ScrollMode::Scrolling,
            scroll_speed: SCROLL_SPEED,

            seed: None,
            high_score_path: PathBuf::from("high_score.txt"),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from disk, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json));

        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    /// Write settings to disk as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values the simulation cannot work with
    pub fn validated(mut self) -> Self {
        if self.grid_width < 4 {
            log::warn!("grid_width {} too small, using 4", self.grid_width);
            self.grid_width = 4;
        }
        if self.visible_rows < 3 {
            log::warn!("visible_rows {} too small, using 3", self.visible_rows);
            self.visible_rows = 3;
        }
        if self.total_rows < 2 {
            log::warn!("total_rows {} too small, using 2", self.total_rows);
            self.total_rows = 2;
        }
        if self.safe_rows > self.total_rows {
            log::warn!("safe_rows {} exceeds total_rows, clamping", self.safe_rows);
            self.safe_rows = self.total_rows;
        }
        if self.start_offset == 0 || self.start_offset > self.total_rows {
            log::warn!("start_offset {} outside the world, clamping", self.start_offset);
            self.start_offset = self.start_offset.clamp(1, self.total_rows);
        }
        if !(self.scroll_speed.is_finite() && self.scroll_speed >= 0.0) {
            log::warn!("scroll_speed {} invalid, using default", self.scroll_speed);
            self.scroll_speed = SCROLL_SPEED;
        }
        self
    }

    /// Row the player starts on (and scores from), kept inside the safe zone
    pub fn start_row(&self) -> i32 {
        let last = self.total_rows.saturating_sub(1);
        let row = self.total_rows.saturating_sub(self.start_offset).min(last);
        let safe_edge = self.total_rows.saturating_sub(self.safe_rows);
        if self.safe_rows > 0 {
            row.max(safe_edge) as i32
        } else {
            row as i32
        }
    }

    pub fn start_column(&self) -> i32 {
        self.grid_width / 2
    }
}
