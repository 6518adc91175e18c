//! Idle/demo mode player
//!
//! Greedy and short-sighted: hop forward when the next row looks survivable
//! for a moment, otherwise stay put, otherwise sidestep or retreat.

use super::collision::{PLAYER_WIDTH, intervals_overlap, overlap_length};
use super::hazard::Hazard;
use super::state::{GamePhase, GameState};
use super::terrain::TerrainKind;
use super::tick::Hop;
use crate::settings::ScrollMode;

/// How far ahead (seconds) hazards are projected
pub const LOOKAHEAD: f32 = 0.3;

/// Overlap wanted under the player before trusting a log
pub const SAFE_RIDE: f32 = 0.6;

/// Pick the next hop, or `None` to wait this tick
pub fn choose_hop(state: &GameState) -> Option<Hop> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let landing = |hop: Hop| {
        let (dx, dy) = hop.delta();
        let (x, y) = state.player.target_cell(dx, dy);
        (x as f32, y)
    };

    if is_safe(state, landing(Hop::Forward)) {
        return Some(Hop::Forward);
    }
    if is_safe(state, (state.player.x, state.player.y)) {
        return None;
    }
    [Hop::Left, Hop::Right, Hop::Back]
        .into_iter()
        .find(|&hop| is_safe(state, landing(hop)))
}

/// Would standing at `(x, y)` survive the next `LOOKAHEAD` seconds?
pub fn is_safe(state: &GameState, (x, y): (f32, i32)) -> bool {
    let width = state.settings.grid_width as f32;
    if x < 0.0 || x >= width || y < 0 || y >= state.settings.total_rows as i32 {
        return false;
    }
    if state.obstacles.has_tree_at(x as i32, y) {
        return false;
    }
    // The bottom row of a scrolling window is about to fall off
    if state.settings.scroll_mode == ScrollMode::Scrolling
        && y as f32 + 1.0 >= state.scroll_y + state.settings.visible_rows as f32
    {
        return false;
    }

    match state.terrain.kind_at(y) {
        Some(TerrainKind::Grass) => true,
        Some(TerrainKind::Road) => !state
            .obstacles
            .hazards_on_row(y)
            .filter(|h| h.is_car())
            .any(|car| sweeps_over(car, x)),
        Some(TerrainKind::Rail) => {
            !state.obstacles.is_train_warning(y)
                && !state.obstacles.hazards_on_row(y).any(|h| h.is_train())
        }
        Some(TerrainKind::River) => state
            .obstacles
            .hazards_on_row(y)
            .filter(|h| h.is_log())
            .any(|log| rides_through(log, x, width)),
        None => false,
    }
}

/// Does the hazard's path over the lookahead cross the cell at `x`?
fn sweeps_over(hazard: &Hazard, x: f32) -> bool {
    let shift = hazard.velocity() * LOOKAHEAD;
    let left = hazard.left().min(hazard.left() + shift);
    let right = hazard.right().max(hazard.right() + shift);
    intervals_overlap(x, x + PLAYER_WIDTH, left, right)
}

/// Is there solid footing at `x` now and after drifting with the log?
fn rides_through(log: &Hazard, x: f32, world_width: f32) -> bool {
    let shift = log.velocity() * LOOKAHEAD;
    let drifted = x + shift;
    overlap_length(x, x + PLAYER_WIDTH, log.left(), log.right()) >= SAFE_RIDE
        && (0.0..world_width - PLAYER_WIDTH).contains(&drifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::hazard::{CarKind, ColorClass, Tree};
    use crate::sim::terrain::{Terrain, TerrainRow};
    use crate::sim::tick::{TickInput, tick};
    use crate::sim::track::TrainTrack;

    /// Playing, 40 rows, camera follow, player on (10, 37), no hazards
    fn quiet_world(rows: &[(i32, TerrainKind)]) -> GameState {
        let settings = Settings {
            total_rows: 40,
            visible_rows: 10,
            scroll_mode: ScrollMode::CameraFollow,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(settings, 11);
        state.start();
        let kinds = (0..40)
            .map(|i| TerrainRow {
                row_index: i,
                kind: rows
                    .iter()
                    .find(|(r, _)| *r == i)
                    .map_or(TerrainKind::Grass, |(_, k)| *k),
            })
            .collect();
        state.terrain = Terrain::from_rows(kinds);
        state.obstacles.reset();
        state
    }

    #[test]
    fn test_open_grass_goes_forward() {
        let state = quiet_world(&[]);
        assert_eq!(choose_hop(&state), Some(Hop::Forward));
    }

    #[test]
    fn test_waits_for_car() {
        let mut state = quiet_world(&[(36, TerrainKind::Road)]);
        state
            .obstacles
            .insert_hazard(Hazard::car(CarKind::Sedan, 9.5, 36, 2.0, 1, ColorClass::Red));
        assert_eq!(choose_hop(&state), None);

        // A car far away and heading off is no threat
        state.obstacles.reset();
        state
            .obstacles
            .insert_hazard(Hazard::car(CarKind::Sedan, 14.0, 36, 2.0, 1, ColorClass::Red));
        assert_eq!(choose_hop(&state), Some(Hop::Forward));
    }

    #[test]
    fn test_tree_ahead_means_wait() {
        let mut state = quiet_world(&[]);
        state.obstacles.insert_tree(Tree { x: 10, y: 36 });
        assert_eq!(choose_hop(&state), None);
    }

    #[test]
    fn test_escapes_incoming_car() {
        let mut state = quiet_world(&[(37, TerrainKind::Road)]);
        state.obstacles.insert_tree(Tree { x: 10, y: 36 });
        // Rightward car closing in from the left
        state
            .obstacles
            .insert_hazard(Hazard::car(CarKind::Smart, 8.6, 37, 3.0, 1, ColorClass::Blue));
        // Hopping left lands in its path; right stays ahead of it
        assert_eq!(choose_hop(&state), Some(Hop::Right));
    }

    #[test]
    fn test_rail_warning_blocks() {
        let mut state = quiet_world(&[(36, TerrainKind::Rail)]);
        state
            .obstacles
            .insert_track(TrainTrack::with_timer(36, 1, 1.0, 0.0, 20.0));
        assert_eq!(choose_hop(&state), None);

        state.obstacles.reset();
        state
            .obstacles
            .insert_track(TrainTrack::with_timer(36, 1, 6.0, 0.0, 20.0));
        assert_eq!(choose_hop(&state), Some(Hop::Forward));
    }

    #[test]
    fn test_only_boards_solid_logs() {
        let mut state = quiet_world(&[(36, TerrainKind::River)]);
        assert_eq!(choose_hop(&state), None);

        state.obstacles.insert_hazard(Hazard::log(9.0, 36, 1.0, 1));
        assert_eq!(choose_hop(&state), Some(Hop::Forward));

        // Barely touching the tail is not good enough
        state.obstacles.reset();
        state.obstacles.insert_hazard(Hazard::log(7.8, 36, 1.0, 1));
        assert_eq!(choose_hop(&state), None);
    }

    #[test]
    fn test_idle_mode_drives_the_tick() {
        let mut state = quiet_world(&[]);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &idle, 1.0 / 60.0);
        }
        assert_eq!(state.player.y, 32);
        assert_eq!(state.score(), 5);
    }

    #[test]
    fn test_idle_mode_starts_the_run() {
        let mut state = GameState::with_seed(Settings::default(), 5);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_no_hops_outside_play() {
        let state = GameState::with_seed(Settings::default(), 5);
        assert_eq!(choose_hop(&state), None);
    }
}
