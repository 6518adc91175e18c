//! Lane Hopper - An endless lane-crossing arcade world
//!
//! Core modules:
//! - `sim`: World simulation (terrain, hazards, trains, player, game state)
//! - `settings`: Data-driven world configuration
//! - `highscores`: Persisted best score
//! - `error`: Error types for the persistence edges

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{HighScoreError, SettingsError};
pub use highscores::{FileHighScore, HighScoreStore, MemoryHighScore};
pub use settings::{ScrollMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World defaults (overridable through `Settings`)
    pub const GRID_WIDTH: i32 = 20;
    pub const VISIBLE_ROWS: i32 = 15;
    pub const TOTAL_ROWS: usize = 100;
    pub const SAFE_ROWS: usize = 5;
    /// Player starts on row `TOTAL_ROWS - START_OFFSET`
    pub const START_OFFSET: usize = 3;
    /// Rows per second the extinction line advances
    pub const SCROLL_SPEED: f32 = 0.4;

    /// Cars: cells per second at progress 0 and the extra added at progress 1
    pub const CAR_SPEED_MIN: f32 = 1.0;
    pub const CAR_SPEED_MAX: f32 = 3.0;
    pub const CAR_SPEED_RAMP: f32 = 1.5;

    /// Logs: cells per second, ramped up with progress
    pub const LOG_SPEED_MIN: f32 = 0.5;
    pub const LOG_SPEED_MAX: f32 = 2.0;
    pub const LOG_SPEED_RAMP: f32 = 0.8;
    pub const LOG_WIDTH: f32 = 2.5;

    /// Fraction of the player's width that must rest on a log to ride it
    pub const RIDE_THRESHOLD: f32 = 0.25;

    /// Trains
    pub const TRAIN_SPEED: f32 = 30.0;
    pub const TRAIN_WIDTH: f32 = 8.0;
    /// Seconds of advance warning before a train arrives
    pub const WARNING_TIME: f32 = 2.0;
    /// Idle interval bounds between trains (seconds, before progress scaling)
    pub const TRAIN_INTERVAL_MIN: f32 = 4.0;
    pub const TRAIN_INTERVAL_MAX: f32 = 8.0;
}
