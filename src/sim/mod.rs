//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (hazards keyed by row)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod hazard;
pub mod obstacles;
pub mod player;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod track;
pub mod view;

pub use hazard::{CarKind, ColorClass, Hazard, HazardKind, Tree};
pub use obstacles::ObstacleManager;
pub use player::Player;
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use spawner::{HazardSpawner, RowContents};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use terrain::{Terrain, TerrainGenerator, TerrainKind, TerrainRow};
pub use tick::{Hop, TickInput, advance, tick};
pub use track::{TrackEvent, TrackPhase, TrainTrack};
pub use view::{HazardView, RowView, WorldView};
