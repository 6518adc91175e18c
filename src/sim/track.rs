//! Rail track state machine
//!
//! Each rail row owns one `TrainTrack`. A track sits idle counting down,
//! raises a warning for the last `WARNING_TIME` seconds, then runs a single
//! train across the row. Once the train has fully left the row the countdown
//! starts again.

use super::difficulty::{track_start_chances, train_interval_scale};
use super::hazard::Hazard;
use super::rng::RandomSource;
use crate::consts::*;

/// Observable phase of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackPhase {
    Idle,
    Warning,
    Active,
}

/// Something the caller may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    WarningStarted,
    TrainSpawned,
    TrainCleared,
}

#[derive(Debug, Clone)]
pub struct TrainTrack {
    pub row: i32,
    pub direction: i8,
    pub time_until_next_train: f32,
    pub warning: bool,
    pub active_train: Option<Hazard>,
    progress: f32,
    world_width: f32,
}

impl TrainTrack {
    /// New track with a randomized starting phase so neighbouring tracks
    /// don't fire in lockstep
    pub fn new(row: i32, progress: f32, world_width: f32, rng: &mut dyn RandomSource) -> Self {
        let direction = rng.direction();
        let (active_chance, warning_chance) = track_start_chances(progress);
        let mut track = Self::with_timer(row, direction, 0.0, progress, world_width);

        let roll = rng.next_f32();
        if roll < active_chance {
            // Train already mid-run, biased toward its entry side so the
            // player still sees most of it
            let offset = rng.range_f32(0.0, world_width * 0.5);
            let x = if direction > 0 {
                -TRAIN_WIDTH * 0.5 + offset
            } else {
                world_width - TRAIN_WIDTH * 0.5 - offset
            };
            track.active_train = Some(Hazard::train(x, row, direction));
        } else if roll < active_chance + warning_chance {
            track.time_until_next_train = rng.range_f32(0.5, WARNING_TIME);
        } else {
            track.time_until_next_train = track.draw_interval(rng);
        }
        track.warning =
            track.active_train.is_none() && track.time_until_next_train <= WARNING_TIME;

        log::debug!("Rail row {} starts {:?}", row, track.phase());
        track
    }

    /// Idle or warning track with an explicit countdown
    pub fn with_timer(
        row: i32,
        direction: i8,
        time_until_next_train: f32,
        progress: f32,
        world_width: f32,
    ) -> Self {
        Self {
            row,
            direction,
            time_until_next_train,
            warning: time_until_next_train <= WARNING_TIME,
            active_train: None,
            progress,
            world_width,
        }
    }

    pub fn phase(&self) -> TrackPhase {
        if self.active_train.is_some() {
            TrackPhase::Active
        } else if self.warning {
            TrackPhase::Warning
        } else {
            TrackPhase::Idle
        }
    }

    pub fn is_warning(&self) -> bool {
        self.warning
    }

    pub fn train(&self) -> Option<&Hazard> {
        self.active_train.as_ref()
    }

    /// Idle countdown for the next train, shorter further from the start
    fn draw_interval(&self, rng: &mut dyn RandomSource) -> f32 {
        let scale = train_interval_scale(self.progress);
        rng.range_f32(TRAIN_INTERVAL_MIN * scale, TRAIN_INTERVAL_MAX * scale)
    }

    /// Train placed just off the row on the side it enters from
    fn spawn_train(&self) -> Hazard {
        let x = if self.direction > 0 {
            -TRAIN_WIDTH
        } else {
            self.world_width
        };
        Hazard::train(x, self.row, self.direction)
    }

    /// Has the train fully left the row in its direction of travel?
    fn train_gone(&self, train: &Hazard) -> bool {
        if train.direction > 0 {
            train.left() >= self.world_width
        } else {
            train.right() <= 0.0
        }
    }

    /// Advance the track by `dt`; at most one transition happens per call
    pub fn update(&mut self, dt: f32, rng: &mut dyn RandomSource) -> Option<TrackEvent> {
        if let Some(train) = self.active_train.as_mut() {
            train.advance(dt);
            let train = *train;
            if self.train_gone(&train) {
                self.active_train = None;
                self.warning = false;
                self.time_until_next_train = self.draw_interval(rng);
                return Some(TrackEvent::TrainCleared);
            }
            return None;
        }

        self.time_until_next_train -= dt;
        if self.time_until_next_train <= 0.0 {
            self.active_train = Some(self.spawn_train());
            self.warning = false;
            return Some(TrackEvent::TrainSpawned);
        }
        if !self.warning && self.time_until_next_train <= WARNING_TIME {
            self.warning = true;
            return Some(TrackEvent::WarningStarted);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, ScriptedSource};

    #[test]
    fn test_warning_then_train() {
        let mut rng = PcgSource::seeded(5);
        let mut track = TrainTrack::with_timer(4, 1, 1.0, 0.0, 20.0);
        assert!(track.is_warning());
        assert_eq!(track.phase(), TrackPhase::Warning);

        assert_eq!(track.update(0.5, &mut rng), None);
        assert!(track.is_warning());

        assert_eq!(track.update(0.5, &mut rng), Some(TrackEvent::TrainSpawned));
        assert!(!track.is_warning());
        let train = track.train().unwrap();
        // Fully off the row on the entry side
        assert!(train.right() <= 0.0);
        assert_eq!(train.y, 4);
    }

    #[test]
    fn test_idle_to_warning() {
        let mut rng = PcgSource::seeded(5);
        let mut track = TrainTrack::with_timer(0, -1, 3.0, 0.0, 20.0);
        assert_eq!(track.phase(), TrackPhase::Idle);
        assert_eq!(track.update(0.5, &mut rng), None);
        assert_eq!(track.update(0.6, &mut rng), Some(TrackEvent::WarningStarted));
        assert_eq!(track.phase(), TrackPhase::Warning);
    }

    #[test]
    fn test_left_moving_train_spawns_on_right() {
        let mut rng = PcgSource::seeded(5);
        let mut track = TrainTrack::with_timer(2, -1, 0.1, 0.0, 20.0);
        track.update(0.2, &mut rng);
        assert_eq!(track.train().unwrap().left(), 20.0);
    }

    #[test]
    fn test_train_clears_and_rearms() {
        let mut rng = PcgSource::seeded(8);
        let mut track = TrainTrack::with_timer(1, 1, 0.0, 1.0, 20.0);
        assert_eq!(track.update(0.01, &mut rng), Some(TrackEvent::TrainSpawned));

        // Needs to travel width + row length = 28 cells at 30 cells/s
        let mut cleared = false;
        for _ in 0..100 {
            if track.update(0.05, &mut rng) == Some(TrackEvent::TrainCleared) {
                cleared = true;
                break;
            }
            assert!(track.train().is_some());
        }
        assert!(cleared);
        assert_eq!(track.phase(), TrackPhase::Idle);
        // Interval scaled by 0.7 at full progress
        assert!(track.time_until_next_train >= TRAIN_INTERVAL_MIN * 0.7);
        assert!(track.time_until_next_train < TRAIN_INTERVAL_MAX * 0.7);
    }

    #[test]
    fn test_initial_phase_is_randomized() {
        // direction roll, then phase roll
        let active = TrainTrack::new(0, 0.0, 20.0, &mut ScriptedSource::new(vec![0.9, 0.05, 0.5]));
        assert_eq!(active.phase(), TrackPhase::Active);
        assert_eq!(active.train().unwrap().direction, 1);

        let warning = TrainTrack::new(0, 0.0, 20.0, &mut ScriptedSource::new(vec![0.9, 0.15, 0.5]));
        assert_eq!(warning.phase(), TrackPhase::Warning);
        assert!(warning.time_until_next_train <= WARNING_TIME);

        let idle = TrainTrack::new(0, 0.0, 20.0, &mut ScriptedSource::new(vec![0.1, 0.9, 0.5]));
        assert_eq!(idle.phase(), TrackPhase::Idle);
        assert_eq!(idle.direction, -1);
        assert!(idle.time_until_next_train > WARNING_TIME);
    }

    #[test]
    fn test_start_chances_grow_with_progress() {
        // Same rolls, different progress: 10%/10% at the start, 30%/30% far out
        let roll = |phase_roll: f32, progress: f32| {
            let mut rng = ScriptedSource::new(vec![0.9, phase_roll, 0.5]);
            TrainTrack::new(0, progress, 20.0, &mut rng).phase()
        };

        assert_eq!(roll(0.25, 0.0), TrackPhase::Idle);
        assert_eq!(roll(0.25, 1.0), TrackPhase::Active);

        assert_eq!(roll(0.5, 0.0), TrackPhase::Idle);
        assert_eq!(roll(0.5, 1.0), TrackPhase::Warning);

        assert_eq!(roll(0.15, 0.5), TrackPhase::Active);
        assert_eq!(roll(0.35, 0.5), TrackPhase::Warning);
        assert_eq!(roll(0.45, 0.5), TrackPhase::Idle);
    }

    #[test]
    fn test_at_most_one_train() {
        let mut rng = PcgSource::seeded(11);
        let mut track = TrainTrack::new(3, 0.8, 20.0, &mut rng);
        let mut spawned = 0;
        let mut cleared = 0;
        for _ in 0..6000 {
            match track.update(1.0 / 60.0, &mut rng) {
                Some(TrackEvent::TrainSpawned) => {
                    spawned += 1;
                    // Never spawns over a running train
                    assert!(spawned - cleared <= 1);
                }
                Some(TrackEvent::TrainCleared) => cleared += 1,
                _ => {}
            }
        }
        assert!(spawned >= 5);
    }
}
