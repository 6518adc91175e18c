//! Terrain rows and the clustered world generator
//!
//! The world is a fixed strip of rows. Row 0 is the far end; the last
//! `safe_rows` rows are where the player starts and are always grass.
//! Generation walks from the safe zone toward row 0, placing whole clusters of
//! one terrain kind at a time.

use serde::{Deserialize, Serialize};

use super::difficulty::{TerrainWeights, grass_break_chance, progress};
use super::rng::RandomSource;

/// What a row is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Grass,
    Road,
    River,
    Rail,
}

impl TerrainKind {
    /// Sampling order used with `TerrainWeights::as_array`
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Grass,
        TerrainKind::Road,
        TerrainKind::River,
        TerrainKind::Rail,
    ];

    /// Rows that can kill the player by themselves
    pub fn is_dangerous(&self) -> bool {
        !matches!(self, TerrainKind::Grass)
    }
}

/// One generated row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainRow {
    pub row_index: i32,
    pub kind: TerrainKind,
}

/// The full row sequence for a session, ordered by index
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    rows: Vec<TerrainRow>,
}

impl Terrain {
    pub fn from_rows(rows: Vec<TerrainRow>) -> Self {
        debug_assert!(rows.iter().enumerate().all(|(i, r)| r.row_index == i as i32));
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TerrainRow] {
        &self.rows
    }

    /// Terrain at `row`, or None outside the world
    pub fn kind_at(&self, row: i32) -> Option<TerrainKind> {
        usize::try_from(row)
            .ok()
            .and_then(|i| self.rows.get(i))
            .map(|r| r.kind)
    }

    /// Rows whose index falls in [start, end), clipped to the world
    pub fn slice(&self, start: i32, end: i32) -> &[TerrainRow] {
        let len = self.rows.len() as i32;
        let start = start.clamp(0, len) as usize;
        let end = end.clamp(0, len) as usize;
        if start >= end {
            return &[];
        }
        &self.rows[start..end]
    }
}

/// Builds the row sequence for a world of a given shape
#[derive(Debug, Clone, Copy)]
pub struct TerrainGenerator {
    pub total_rows: usize,
    pub safe_rows: usize,
}

impl TerrainGenerator {
    pub fn new(total_rows: usize, safe_rows: usize) -> Self {
        Self {
            total_rows,
            safe_rows: safe_rows.min(total_rows),
        }
    }

    pub fn progress(&self, row: i32) -> f32 {
        progress(row, self.total_rows, self.safe_rows)
    }

    /// Rows sized for one cluster of `kind` at this difficulty
    fn cluster_size(kind: TerrainKind, progress: f32, rng: &mut dyn RandomSource) -> i32 {
        match kind {
            TerrainKind::Grass => rng.range_i32(1, 2),
            TerrainKind::Road | TerrainKind::River => {
                if progress < 0.3 {
                    1
                } else if progress < 0.6 {
                    rng.range_i32(1, 2)
                } else {
                    rng.range_i32(1, 3)
                }
            }
            TerrainKind::Rail => 1,
        }
    }

    /// Generate every row in [0, total_rows)
    pub fn generate(&self, rng: &mut dyn RandomSource) -> Terrain {
        let mut kinds = vec![TerrainKind::Grass; self.total_rows];
        let playable = self.total_rows.saturating_sub(self.safe_rows);

        // Cursor is the highest row index not yet assigned; clusters grow downward
        let mut cursor = playable as i32 - 1;
        // The safe zone behind the first cluster is grass
        let mut previous_dangerous = false;
        let mut clusters = 0usize;

        while cursor >= 0 {
            let p = self.progress(cursor);
            let weights = TerrainWeights::at(p).as_array();
            let kind = TerrainKind::ALL[rng.weighted_index(&weights)];

            if kind.is_dangerous() && previous_dangerous && rng.chance(grass_break_chance(p)) {
                let size = rng.range_i32(1, 2);
                cursor = fill_cluster(&mut kinds, cursor, size, TerrainKind::Grass);
                clusters += 1;
                if cursor < 0 {
                    break;
                }
            }

            let size = Self::cluster_size(kind, p, rng);
            cursor = fill_cluster(&mut kinds, cursor, size, kind);
            clusters += 1;
            previous_dangerous = kind.is_dangerous();
        }

        log::debug!(
            "Generated {} rows ({} safe) in {} clusters",
            self.total_rows,
            self.safe_rows,
            clusters
        );

        Terrain::from_rows(
            kinds
                .into_iter()
                .enumerate()
                .map(|(i, kind)| TerrainRow {
                    row_index: i as i32,
                    kind,
                })
                .collect(),
        )
    }
}

/// Paint `size` rows ending at `cursor` (clipped at row 0); returns the next cursor
fn fill_cluster(kinds: &mut [TerrainKind], cursor: i32, size: i32, kind: TerrainKind) -> i32 {
    let low = (cursor - size + 1).max(0);
    for row in low..=cursor {
        kinds[row as usize] = kind;
    }
    low - 1
}
