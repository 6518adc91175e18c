//! Per-row hazard generation
//!
//! Given a row and its terrain, build a fresh set of hazards scaled by the
//! row's progress. Road and river rows share one speed and direction across
//! the whole row so lanes read as traffic rather than noise.

use super::difficulty::{
    car_count_range, car_kind_weights, log_count_range, max_trees, progress,
};
use super::hazard::{CarKind, ColorClass, Hazard, Tree};
use super::rng::RandomSource;
use super::terrain::TerrainKind;
use super::track::TrainTrack;
use crate::consts::*;

/// Everything a single row holds
#[derive(Debug, Clone, Default)]
pub struct RowContents {
    pub movers: Vec<Hazard>,
    pub trees: Vec<Tree>,
    pub track: Option<TrainTrack>,
}

impl RowContents {
    pub fn is_empty(&self) -> bool {
        self.movers.is_empty() && self.trees.is_empty() && self.track.is_none()
    }
}

/// Hazard factory for one world shape
#[derive(Debug, Clone, Copy)]
pub struct HazardSpawner {
    pub world_width: i32,
    pub total_rows: usize,
    pub safe_rows: usize,
}

impl HazardSpawner {
    pub fn new(world_width: i32, total_rows: usize, safe_rows: usize) -> Self {
        Self {
            world_width,
            total_rows,
            safe_rows,
        }
    }

    pub fn progress(&self, row: i32) -> f32 {
        progress(row, self.total_rows, self.safe_rows)
    }

    /// Rows at the start end of the world never get hazards
    pub fn is_safe_row(&self, row: i32) -> bool {
        row >= (self.total_rows - self.safe_rows.min(self.total_rows)) as i32
    }

    pub fn generate_for_row(
        &self,
        row: i32,
        kind: TerrainKind,
        rng: &mut dyn RandomSource,
    ) -> RowContents {
        if self.is_safe_row(row) {
            return RowContents::default();
        }

        let p = self.progress(row);
        match kind {
            TerrainKind::Road => RowContents {
                movers: self.cars(row, p, rng),
                ..Default::default()
            },
            TerrainKind::River => RowContents {
                movers: self.logs(row, p, rng),
                ..Default::default()
            },
            TerrainKind::Grass => RowContents {
                trees: self.trees(row, p, rng),
                ..Default::default()
            },
            TerrainKind::Rail => RowContents {
                track: Some(TrainTrack::new(row, p, self.world_width as f32, rng)),
                ..Default::default()
            },
        }
    }

    /// Evenly spread starting positions with jitter, mirrored for leftward rows
    fn lane_positions(
        &self,
        count: i32,
        jitter: f32,
        direction: i8,
        rng: &mut dyn RandomSource,
    ) -> Vec<f32> {
        let width = self.world_width as f32;
        let spacing = width / count as f32;
        (0..count)
            .map(|i| {
                let x = i as f32 * spacing + rng.range_f32(-spacing * jitter, spacing * jitter);
                if direction < 0 { width - x } else { x }
            })
            .collect()
    }

    fn cars(&self, row: i32, p: f32, rng: &mut dyn RandomSource) -> Vec<Hazard> {
        let (lo, hi) = car_count_range(p);
        let count = rng.range_i32(lo, hi);
        let ramp = CAR_SPEED_RAMP * p;
        let speed = rng.range_f32(CAR_SPEED_MIN + ramp, CAR_SPEED_MAX + ramp);
        let direction = rng.direction();
        let weights = car_kind_weights(p);

        let cars: Vec<Hazard> = self
            .lane_positions(count, 0.3, direction, rng)
            .into_iter()
            .map(|x| {
                let kind = CarKind::ALL[rng.weighted_index(&weights)];
                let paint = ColorClass::CAR_PAINTS[rng.range_i32(0, 2) as usize];
                Hazard::car(kind, x, row, speed, direction, paint)
            })
            .collect();

        log::debug!(
            "Road row {}: {} cars at {:.2} cells/s heading {}",
            row,
            cars.len(),
            speed,
            direction
        );
        cars
    }

    fn logs(&self, row: i32, p: f32, rng: &mut dyn RandomSource) -> Vec<Hazard> {
        let (lo, hi) = log_count_range(p);
        let count = rng.range_i32(lo, hi);
        let ramp = LOG_SPEED_RAMP * p;
        let speed = rng.range_f32(LOG_SPEED_MIN + ramp, LOG_SPEED_MAX + ramp);
        let direction = rng.direction();

        let logs: Vec<Hazard> = self
            .lane_positions(count, 0.2, direction, rng)
            .into_iter()
            .map(|x| Hazard::log(x, row, speed, direction))
            .collect();

        log::debug!(
            "River row {}: {} logs at {:.2} cells/s heading {}",
            row,
            logs.len(),
            speed,
            direction
        );
        logs
    }

    fn trees(&self, row: i32, p: f32, rng: &mut dyn RandomSource) -> Vec<Tree> {
        let count = rng.range_i32(0, max_trees(p)).max(0) as usize;
        rng.sample_distinct(self.world_width as usize, count)
            .into_iter()
            .map(|col| Tree { x: col as i32, y: row })
            .collect()
    }
}
