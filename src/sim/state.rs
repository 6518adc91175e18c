//! Game state and session lifecycle
//!
//! `GameState` exclusively owns the terrain, the hazards and the player; the
//! tick in `tick.rs` is the only thing that advances them.

use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleManager;
use super::player::Player;
use super::rng::{PcgSource, RandomSource};
use super::spawner::HazardSpawner;
use super::terrain::{Terrain, TerrainGenerator, TerrainKind};
use super::track::TrackEvent;
use crate::highscores::{HighScoreStore, MemoryHighScore};
use crate::settings::{ScrollMode, Settings};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, world generated but frozen
    Start,
    /// Active gameplay
    Playing,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// In a river with no log underneath
    Drowned,
    /// Carried off the edge of the world by a log
    SweptAway,
    HitByCar,
    HitByTrain,
    /// Fell below the advancing window
    LeftBehind,
}

/// Things the host may want to react to (sound, UI flashes, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Moved { x: i32, y: i32 },
    TrainWarning { row: i32 },
    TrainArrived { row: i32 },
    GameOver { cause: DeathCause, score: u32 },
    NewHighScore { score: u32 },
}

/// Complete simulation state for one session
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    pub player: Player,
    pub terrain: Terrain,
    pub obstacles: ObstacleManager,
    /// Top row of the visible window; only ever moves toward row 0
    pub scroll_y: f32,
    pub high_score: u32,
    pub death_cause: Option<DeathCause>,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    rng: Box<dyn RandomSource>,
    high_scores: Box<dyn HighScoreStore>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("player", &self.player)
            .field("scroll_y", &self.scroll_y)
            .field("high_score", &self.high_score)
            .field("death_cause", &self.death_cause)
            .field("time_ticks", &self.time_ticks)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Build a session with the given randomness and score store
    pub fn new(
        settings: Settings,
        rng: Box<dyn RandomSource>,
        high_scores: Box<dyn HighScoreStore>,
    ) -> Self {
        let settings = settings.validated();
        let spawner = HazardSpawner::new(settings.grid_width, settings.total_rows, settings.safe_rows);
        let high_score = high_scores.load();

        let mut state = Self {
            player: Player::new(settings.start_column(), settings.start_row()),
            phase: GamePhase::Start,
            terrain: Terrain::default(),
            obstacles: ObstacleManager::new(spawner),
            scroll_y: 0.0,
            high_score,
            death_cause: None,
            time_ticks: 0,
            events: Vec::new(),
            rng,
            high_scores,
            settings,
        };
        state.build_world();
        state
    }

    /// Seeded session with an in-memory score store
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(
            settings,
            Box::new(PcgSource::seeded(seed)),
            Box::new(MemoryHighScore::default()),
        )
    }

    /// (Re)generate terrain and hazards and put the player back at the start
    fn build_world(&mut self) {
        let generator = TerrainGenerator::new(self.settings.total_rows, self.settings.safe_rows);
        self.terrain = generator.generate(self.rng.as_mut());
        self.obstacles.reset();
        self.obstacles.generate_all(&self.terrain, self.rng.as_mut());
        self.player.reset();
        self.scroll_y = self.initial_scroll();
        self.death_cause = None;
        self.time_ticks = 0;
    }

    fn initial_scroll(&self) -> f32 {
        (self.settings.total_rows as i32 - self.settings.visible_rows).max(0) as f32
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.phase != GamePhase::Start {
            return;
        }
        self.build_world();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started ({} rows)", self.terrain.len());
    }

    /// Fresh world after a game over
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.build_world();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// Hop one cell; anything but a single orthogonal step is ignored, as are
    /// hops off the world or into a tree
    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        if self.phase != GamePhase::Playing || dx.abs() + dy.abs() != 1 {
            return false;
        }
        let (tx, ty) = self.player.target_cell(dx, dy);
        if self.obstacles.has_tree_at(tx, ty) {
            return false;
        }
        let moved = self.player.move_by(
            dx,
            dy,
            self.settings.grid_width,
            self.settings.total_rows as i32,
        );
        if moved {
            self.events.push(GameEvent::Moved {
                x: self.player.x as i32,
                y: self.player.y,
            });
        }
        moved
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn terrain_under_player(&self) -> Option<TerrainKind> {
        self.terrain.kind_at(self.player.y)
    }

    /// End the run and settle the high score
    pub(crate) fn game_over(&mut self, cause: DeathCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.death_cause = Some(cause);

        let score = self.score();
        log::info!("Game over: {:?} with score {}", cause, score);
        self.events.push(GameEvent::GameOver { cause, score });

        if score > self.high_score {
            self.high_score = score;
            self.high_scores.save(score);
            self.events.push(GameEvent::NewHighScore { score });
            log::info!("New high score: {}", score);
        }
    }

    /// Rows currently on screen as `[start, end)`
    ///
    /// While scrolling, partly visible rows at either edge are included, so
    /// the window reaches the death line. A player who has hopped above the
    /// top of the scrolling window is off screen; the window never chases
    /// the player in that mode.
    pub fn visible_window(&self) -> (i32, i32) {
        let total = self.settings.total_rows as i32;
        let height = self.settings.visible_rows.min(total);
        match self.settings.scroll_mode {
            ScrollMode::Scrolling => {
                let bottom = self.scroll_y + self.settings.visible_rows as f32;
                let start = (self.scroll_y.floor() as i32).clamp(0, (total - height).max(0));
                let end = (bottom.ceil() as i32).clamp(start, total);
                (start, end)
            }
            ScrollMode::CameraFollow => {
                let top = (self.player.y - height / 2).max(0);
                let start = top.min(total - height).max(0);
                (start, (start + height).min(total))
            }
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move hazards and run rail tracks, surfacing track changes as events
    pub(crate) fn update_obstacles(&mut self, dt: f32) {
        for (row, event) in self.obstacles.update(dt, self.rng.as_mut()) {
            match event {
                TrackEvent::WarningStarted => self.events.push(GameEvent::TrainWarning { row }),
                TrackEvent::TrainSpawned => self.events.push(GameEvent::TrainArrived { row }),
                TrackEvent::TrainCleared => {}
            }
        }
    }
}
