//! Hazard entities
//!
//! Moving hazards (cars, logs, trains) share one struct tagged by `HazardKind`;
//! trees are static single-cell blockers and live in their own type.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Car body styles, from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarKind {
    Smart,
    Sedan,
    Truck,
}

impl CarKind {
    /// Order matching `difficulty::car_kind_weights`
    pub const ALL: [CarKind; 3] = [CarKind::Smart, CarKind::Sedan, CarKind::Truck];

    pub fn width(&self) -> f32 {
        match self {
            CarKind::Smart => 1.0,
            CarKind::Sedan => 2.0,
            CarKind::Truck => 3.0,
        }
    }
}

/// Paint bucket the renderer maps to an actual colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorClass {
    Red,
    Blue,
    Orange,
    Wood,
    Steel,
    Foliage,
}

impl ColorClass {
    pub const CAR_PAINTS: [ColorClass; 3] = [ColorClass::Red, ColorClass::Blue, ColorClass::Orange];
}

/// Which moving hazard this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Kills on contact
    Car(CarKind),
    /// Carries the player over water
    Log,
    /// Kills on contact; owned by a `TrainTrack`
    Train,
}

/// A moving hazard occupying `[x, x + width) × [y, y + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    pub x: f32,
    pub y: i32,
    /// Cells per second, always positive
    pub speed: f32,
    /// +1 moves right, -1 moves left
    pub direction: i8,
    pub width: f32,
    pub color: ColorClass,
}

impl Hazard {
    pub fn car(kind: CarKind, x: f32, y: i32, speed: f32, direction: i8, color: ColorClass) -> Self {
        Self {
            kind: HazardKind::Car(kind),
            x,
            y,
            speed,
            direction,
            width: kind.width(),
            color,
        }
    }

    pub fn log(x: f32, y: i32, speed: f32, direction: i8) -> Self {
        Self {
            kind: HazardKind::Log,
            x,
            y,
            speed,
            direction,
            width: LOG_WIDTH,
            color: ColorClass::Wood,
        }
    }

    pub fn train(x: f32, y: i32, direction: i8) -> Self {
        Self {
            kind: HazardKind::Train,
            x,
            y,
            speed: TRAIN_SPEED,
            direction,
            width: TRAIN_WIDTH,
            color: ColorClass::Steel,
        }
    }

    pub fn is_car(&self) -> bool {
        matches!(self.kind, HazardKind::Car(_))
    }

    pub fn is_log(&self) -> bool {
        self.kind == HazardKind::Log
    }

    pub fn is_train(&self) -> bool {
        self.kind == HazardKind::Train
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Signed horizontal velocity in cells per second
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction as f32
    }

    /// Advance without wrapping
    pub fn advance(&mut self, dt: f32) {
        self.x += self.velocity() * dt;
    }

    /// Advance, then wrap to the opposite side once fully past the margin
    pub fn advance_wrapping(&mut self, dt: f32, world_width: f32) {
        self.advance(dt);
        if self.direction > 0 && self.x > world_width + self.width {
            self.x = -self.width;
        } else if self.direction < 0 && self.x < -self.width {
            self.x = world_width + self.width;
        }
    }
}

/// Static blocker on a grass row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tree {
    pub x: i32,
    pub y: i32,
}
