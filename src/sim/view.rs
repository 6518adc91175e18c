//! Render-facing snapshot of the visible window
//!
//! Positions are in world cells: `x` across, `y` the row index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::{ColorClass, HazardKind, Tree};
use super::state::{DeathCause, GamePhase, GameState};
use super::terrain::TerrainKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub row: i32,
    pub kind: TerrainKind,
    /// Flashing crossing lights on a rail row
    pub train_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    /// Left edge and row
    pub pos: Vec2,
    pub width: f32,
    pub kind: HazardKind,
    pub color: ColorClass,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub phase: GamePhase,
    /// Rows on screen as `[start, end)`
    pub window: (i32, i32),
    pub scroll_y: f32,
    pub rows: Vec<RowView>,
    pub hazards: Vec<HazardView>,
    pub trees: Vec<Tree>,
    pub player: Vec2,
    pub score: u32,
    pub high_score: u32,
    pub death_cause: Option<DeathCause>,
}

impl WorldView {
    pub fn capture(state: &GameState) -> Self {
        let window = state.visible_window();
        let (start, end) = window;
        let on_screen = |row: i32| (start..end).contains(&row);

        let rows = state
            .terrain
            .slice(start, end)
            .iter()
            .map(|r| RowView {
                row: r.row_index,
                kind: r.kind,
                train_warning: state.obstacles.is_train_warning(r.row_index),
            })
            .collect();

        let hazards = state
            .obstacles
            .hazards()
            .filter(|h| on_screen(h.y))
            .map(|h| HazardView {
                pos: Vec2::new(h.x, h.y as f32),
                width: h.width,
                kind: h.kind,
                color: h.color,
            })
            .collect();

        let trees = state
            .obstacles
            .trees()
            .filter(|t| on_screen(t.y))
            .copied()
            .collect();

        Self {
            phase: state.phase,
            window,
            scroll_y: state.scroll_y,
            rows,
            hazards,
            trees,
            player: Vec2::new(state.player.x, state.player.y as f32),
            score: state.score(),
            high_score: state.high_score,
            death_cause: state.death_cause,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
