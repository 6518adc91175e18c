//! Difficulty curves
//!
//! Everything that scales with how far a row sits from the safe zone is a
//! function of `progress`, a number in [0, 1].

/// How far `row` is from the safe zone toward row 0, in [0, 1]
///
/// 0 at the edge of the safe zone (and inside it), 1 at the far end.
pub fn progress(row: i32, total_rows: usize, safe_rows: usize) -> f32 {
    let playable = total_rows.saturating_sub(safe_rows);
    if playable == 0 {
        return 0.0;
    }
    (1.0 - row as f32 / playable as f32).clamp(0.0, 1.0)
}

/// Linear ramp from 0 at `start` to `peak` at `end`, flat afterwards
fn ramp(progress: f32, start: f32, end: f32, peak: f32) -> f32 {
    if progress <= start {
        0.0
    } else {
        ((progress - start) / (end - start) * peak).min(peak)
    }
}

/// Per-row terrain probabilities; always sum to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainWeights {
    pub grass: f32,
    pub road: f32,
    pub river: f32,
    pub rail: f32,
}

impl TerrainWeights {
    pub fn at(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let road = 0.50 - 0.15 * progress;
        let river = ramp(progress, 0.15, 0.50, 0.25);
        let rail = ramp(progress, 0.35, 0.75, 0.10);
        Self {
            grass: 1.0 - road - river - rail,
            road,
            river,
            rail,
        }
    }

    /// Weights in `TerrainKind::ALL` order, for inverse-CDF sampling
    pub fn as_array(&self) -> [f32; 4] {
        [self.grass, self.road, self.river, self.rail]
    }
}

/// Probability that a dangerous cluster right after another one gets a grass
/// break inserted first
pub fn grass_break_chance(progress: f32) -> f32 {
    1.0 - 0.5 * progress.clamp(0.0, 1.0)
}

/// Inclusive car-count bounds for a road row
pub fn car_count_range(progress: f32) -> (i32, i32) {
    let progress = progress.clamp(0.0, 1.0);
    (
        1 + progress.floor() as i32,
        2 + (3.0 * progress).floor() as i32,
    )
}

/// Car weights in `CarKind::ALL` order (smart, sedan, truck)
pub fn car_kind_weights(progress: f32) -> [f32; 3] {
    let progress = progress.clamp(0.0, 1.0);
    let smart = 0.5 - 0.1 * progress;
    let truck = 0.1 + 0.2 * progress;
    [smart, 1.0 - smart - truck, truck]
}

/// Inclusive log-count bounds for a river row; fewer logs further out
pub fn log_count_range(progress: f32) -> (i32, i32) {
    if progress < 0.5 { (3, 4) } else { (2, 3) }
}

/// Max static trees on a grass row
pub fn max_trees(progress: f32) -> i32 {
    2 + (2.0 * progress.clamp(0.0, 1.0)).floor() as i32
}

/// Chance a new rail track starts with a train already running, and the
/// separate chance it starts in its warning window
pub fn track_start_chances(progress: f32) -> (f32, f32) {
    let p = 0.1 + 0.2 * progress.clamp(0.0, 1.0);
    (p, p)
}

/// Multiplier on the idle interval between trains
pub fn train_interval_scale(progress: f32) -> f32 {
    1.0 - 0.3 * progress.clamp(0.0, 1.0)
}
