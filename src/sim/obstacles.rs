//! Live hazard bookkeeping
//!
//! Hazards are stored per row (ordered map keyed by row index) so the
//! per-row queries the tick makes never scan the whole world, and iteration
//! order stays stable between runs.

use std::collections::BTreeMap;

use super::collision::{player_hits, player_rides};
use super::hazard::{Hazard, Tree};
use super::rng::RandomSource;
use super::spawner::{HazardSpawner, RowContents};
use super::terrain::{Terrain, TerrainKind};
use super::track::{TrackEvent, TrainTrack};

/// Owns every car, log, tree and rail track in the world
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    spawner: HazardSpawner,
    rows: BTreeMap<i32, RowContents>,
}

impl ObstacleManager {
    pub fn new(spawner: HazardSpawner) -> Self {
        Self {
            spawner,
            rows: BTreeMap::new(),
        }
    }

    pub fn world_width(&self) -> f32 {
        self.spawner.world_width as f32
    }

    /// Replace whatever `row` held with a freshly generated set
    pub fn generate_for_row(&mut self, row: i32, kind: TerrainKind, rng: &mut dyn RandomSource) {
        let contents = self.spawner.generate_for_row(row, kind, rng);
        if contents.is_empty() {
            self.rows.remove(&row);
        } else {
            self.rows.insert(row, contents);
        }
    }

    /// Populate every row of a freshly generated world
    pub fn generate_all(&mut self, terrain: &Terrain, rng: &mut dyn RandomSource) {
        for row in terrain.rows() {
            self.generate_for_row(row.row_index, row.kind, rng);
        }
        log::debug!(
            "Spawned {} movers, {} trees, {} rail tracks",
            self.movers().count(),
            self.trees().count(),
            self.tracks().count()
        );
    }

    /// Move everything by `dt`; returns rail events as `(row, event)`
    pub fn update(&mut self, dt: f32, rng: &mut dyn RandomSource) -> Vec<(i32, TrackEvent)> {
        let world_width = self.world_width();
        let mut events = Vec::new();
        for (&row, contents) in self.rows.iter_mut() {
            for hazard in &mut contents.movers {
                hazard.advance_wrapping(dt, world_width);
            }
            if let Some(track) = contents.track.as_mut() {
                if let Some(event) = track.update(dt, rng) {
                    log::debug!("Rail row {}: {:?}", row, event);
                    events.push((row, event));
                }
            }
        }
        events
    }

    /// Cars and logs plus any running trains
    pub fn hazards(&self) -> impl Iterator<Item = &Hazard> {
        self.rows.values().flat_map(|contents| {
            contents
                .movers
                .iter()
                .chain(contents.track.as_ref().and_then(|t| t.train()))
        })
    }

    pub fn hazards_on_row(&self, row: i32) -> impl Iterator<Item = &Hazard> {
        self.rows.get(&row).into_iter().flat_map(|contents| {
            contents
                .movers
                .iter()
                .chain(contents.track.as_ref().and_then(|t| t.train()))
        })
    }

    pub fn movers(&self) -> impl Iterator<Item = &Hazard> {
        self.rows.values().flat_map(|c| c.movers.iter())
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.rows.values().flat_map(|c| c.trees.iter())
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrainTrack> {
        self.rows.values().filter_map(|c| c.track.as_ref())
    }

    pub fn track_at(&self, row: i32) -> Option<&TrainTrack> {
        self.rows.get(&row).and_then(|c| c.track.as_ref())
    }

    /// Install a track directly, dropping anything else on the row
    pub fn insert_track(&mut self, track: TrainTrack) {
        self.rows.insert(
            track.row,
            RowContents {
                track: Some(track),
                ..Default::default()
            },
        );
    }

    /// Add a single hazard to its row (hand-built layouts and tests)
    pub fn insert_hazard(&mut self, hazard: Hazard) {
        self.rows.entry(hazard.y).or_default().movers.push(hazard);
    }

    pub fn insert_tree(&mut self, tree: Tree) {
        self.rows.entry(tree.y).or_default().trees.push(tree);
    }

    pub fn check_collision_with_car(&self, player_x: f32, player_y: i32) -> bool {
        self.hazards_on_row(player_y)
            .any(|h| h.is_car() && player_hits(h, player_x, player_y))
    }

    pub fn check_collision_with_train(&self, player_x: f32, player_y: i32) -> bool {
        self.hazards_on_row(player_y)
            .any(|h| h.is_train() && player_hits(h, player_x, player_y))
    }

    /// First log carrying at least a quarter of the player's width
    pub fn get_log_at(&self, player_x: f32, player_y: i32) -> Option<&Hazard> {
        self.hazards_on_row(player_y)
            .find(|h| h.is_log() && player_rides(h, player_x, player_y))
    }

    pub fn has_tree_at(&self, x: i32, y: i32) -> bool {
        self.rows
            .get(&y)
            .is_some_and(|c| c.trees.iter().any(|t| t.x == x))
    }

    pub fn is_train_warning(&self, row: i32) -> bool {
        self.track_at(row).is_some_and(|t| t.is_warning())
    }

    /// Drop every hazard, tree and track
    pub fn reset(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::{CarKind, ColorClass};
    use crate::sim::rng::PcgSource;
    use crate::sim::terrain::TerrainGenerator;
    use crate::sim::track::TrackPhase;

    fn manager() -> ObstacleManager {
        ObstacleManager::new(HazardSpawner::new(20, 100, 5))
    }

    #[test]
    fn test_car_collision_rule() {
        let mut obstacles = manager();
        obstacles.insert_hazard(Hazard::car(CarKind::Truck, 5.0, 10, 1.0, 1, ColorClass::Red));

        assert!(obstacles.check_collision_with_car(5.0, 10));
        assert!(obstacles.check_collision_with_car(7.9, 10));
        assert!(obstacles.check_collision_with_car(4.5, 10));
        // Edge contact is not a hit
        assert!(!obstacles.check_collision_with_car(4.0, 10));
        assert!(!obstacles.check_collision_with_car(8.0, 10));
        // Other rows are untouched
        assert!(!obstacles.check_collision_with_car(5.0, 11));
        assert!(!obstacles.check_collision_with_train(5.0, 10));
    }

    #[test]
    fn test_log_lookup() {
        let mut obstacles = manager();
        obstacles.insert_hazard(Hazard::log(0.0, 3, 1.0, 1));
        obstacles.insert_hazard(Hazard::log(10.0, 3, 1.0, 1));

        assert_eq!(obstacles.get_log_at(1.0, 3).map(|l| l.x), Some(0.0));
        assert_eq!(obstacles.get_log_at(11.0, 3).map(|l| l.x), Some(10.0));
        assert_eq!(obstacles.get_log_at(2.25, 3).map(|l| l.x), Some(0.0));
        assert!(obstacles.get_log_at(2.26, 3).is_none());
        assert!(obstacles.get_log_at(5.0, 3).is_none());
        assert!(obstacles.get_log_at(1.0, 4).is_none());
        // Logs are not cars
        assert!(!obstacles.check_collision_with_car(1.0, 3));
    }

    #[test]
    fn test_update_moves_and_wraps() {
        let mut obstacles = manager();
        let mut rng = PcgSource::seeded(0);
        obstacles.insert_hazard(Hazard::car(CarKind::Smart, 0.0, 1, 2.0, 1, ColorClass::Blue));
        obstacles.insert_hazard(Hazard::log(0.0, 2, 2.0, -1));

        obstacles.update(0.5, &mut rng);
        let xs: Vec<f32> = obstacles.movers().map(|h| h.x).collect();
        assert_eq!(xs, vec![1.0, -1.0]);

        // One full cycle brings the car back to its start
        for _ in 0..22 {
            obstacles.update(0.5, &mut rng);
        }
        let car = obstacles.hazards_on_row(1).next().unwrap();
        assert_eq!(car.x, 0.0);
    }

    #[test]
    fn test_regenerating_a_row_replaces_it() {
        let mut obstacles = manager();
        let mut rng = PcgSource::seeded(9);
        obstacles.insert_tree(Tree { x: 3, y: 40 });
        assert!(obstacles.has_tree_at(3, 40));

        obstacles.generate_for_row(40, TerrainKind::Road, &mut rng);
        assert_eq!(obstacles.trees().count(), 0);
        assert!(obstacles.hazards_on_row(40).all(|h| h.is_car()));

        obstacles.generate_for_row(40, TerrainKind::Rail, &mut rng);
        assert_eq!(obstacles.movers().count(), 0);
        assert!(obstacles.track_at(40).is_some());
    }

    #[test]
    fn test_tree_lookup_is_exact() {
        let mut obstacles = manager();
        obstacles.insert_tree(Tree { x: 4, y: 12 });
        assert!(obstacles.has_tree_at(4, 12));
        assert!(!obstacles.has_tree_at(5, 12));
        assert!(!obstacles.has_tree_at(4, 13));
    }

    #[test]
    fn test_train_warning_and_arrival() {
        let mut obstacles = manager();
        let mut rng = PcgSource::seeded(3);
        obstacles.insert_track(TrainTrack::with_timer(20, 1, 1.0, 0.5, 20.0));
        assert!(obstacles.is_train_warning(20));
        assert!(!obstacles.is_train_warning(21));

        let events = obstacles.update(1.0, &mut rng);
        assert_eq!(events, vec![(20, TrackEvent::TrainSpawned)]);
        assert!(!obstacles.is_train_warning(20));
        assert_eq!(obstacles.track_at(20).unwrap().phase(), TrackPhase::Active);

        // Train starts fully off the row, then sweeps through
        assert!(!obstacles.check_collision_with_train(0.0, 20));
        obstacles.update(0.25, &mut rng);
        assert!(obstacles.check_collision_with_train(0.0, 20));
        assert_eq!(obstacles.hazards().filter(|h| h.is_train()).count(), 1);
    }

    #[test]
    fn test_generate_all_and_reset() {
        let mut rng = PcgSource::seeded(77);
        let terrain = TerrainGenerator::new(100, 5).generate(&mut rng);
        let mut obstacles = manager();
        obstacles.generate_all(&terrain, &mut rng);

        let rail_rows = terrain.rows().iter().filter(|r| r.kind == TerrainKind::Rail).count();
        assert_eq!(obstacles.tracks().count(), rail_rows);
        for hazard in obstacles.movers() {
            let kind = terrain.kind_at(hazard.y).unwrap();
            assert!(matches!(kind, TerrainKind::Road | TerrainKind::River));
            assert!(hazard.y < 95);
        }
        for tree in obstacles.trees() {
            assert_eq!(terrain.kind_at(tree.y), Some(TerrainKind::Grass));
        }

        obstacles.reset();
        assert_eq!(obstacles.hazards().count(), 0);
        assert_eq!(obstacles.trees().count(), 0);
        assert_eq!(obstacles.tracks().count(), 0);
    }
}
