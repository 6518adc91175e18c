//! Per-frame simulation tick
//!
//! Order within a tick is fixed: commands, scroll, scroll death, hazard
//! motion, then the checks for whatever terrain the player stands on.

use super::autopilot;
use super::state::{DeathCause, GamePhase, GameState};
use super::terrain::TerrainKind;
use crate::settings::ScrollMode;

/// A single-cell hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Toward row 0
    Forward,
    Back,
    Left,
    Right,
}

impl Hop {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Hop::Forward => (0, -1),
            Hop::Back => (0, 1),
            Hop::Left => (-1, 0),
            Hop::Right => (1, 0),
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Leave the title screen
    pub start: bool,
    /// Begin a fresh run after game over
    pub restart: bool,
    pub hop: Option<Hop>,
    /// Idle/demo mode - the autopilot picks hops
    pub idle_mode: bool,
}

/// Apply `input`, then advance the world by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Idle mode leaves the title screen on its own
    if input.start || (input.idle_mode && state.phase == GamePhase::Start) {
        state.start();
    }
    if input.restart {
        state.restart();
    }

    let hop = match input.hop {
        Some(hop) => Some(hop),
        None if input.idle_mode && state.phase == GamePhase::Playing => {
            autopilot::choose_hop(state)
        }
        None => None,
    };
    if let Some(hop) = hop {
        let (dx, dy) = hop.delta();
        state.move_player(dx, dy);
    }

    advance(state, dt);
}

/// Advance the world by `dt` seconds; a no-op outside `Playing`
pub fn advance(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing || !(dt.is_finite() && dt > 0.0) {
        return;
    }
    state.time_ticks += 1;

    if state.settings.scroll_mode == ScrollMode::Scrolling {
        state.scroll_y = (state.scroll_y - state.settings.scroll_speed * dt).max(0.0);
        let bottom = state.scroll_y + state.settings.visible_rows as f32;
        if state.player.y as f32 >= bottom {
            state.game_over(DeathCause::LeftBehind);
            return;
        }
    }

    state.update_obstacles(dt);

    let Some(terrain) = state.terrain_under_player() else {
        log::error!("Player on row {} outside the world", state.player.y);
        return;
    };

    let (x, y) = (state.player.x, state.player.y);
    match terrain {
        TerrainKind::River => match state.obstacles.get_log_at(x, y).map(|log| log.velocity()) {
            Some(velocity) => {
                state.player.carry(velocity, dt);
                let width = state.settings.grid_width as f32;
                if state.player.x < 0.0 || state.player.x >= width {
                    state.game_over(DeathCause::SweptAway);
                }
            }
            None => state.game_over(DeathCause::Drowned),
        },
        TerrainKind::Road => {
            if state.obstacles.check_collision_with_car(x, y) {
                state.game_over(DeathCause::HitByCar);
            }
        }
        TerrainKind::Rail => {
            if state.obstacles.check_collision_with_train(x, y) {
                state.game_over(DeathCause::HitByTrain);
            }
        }
        TerrainKind::Grass => {}
    }
}
