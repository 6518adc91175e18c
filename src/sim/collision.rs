//! Collision geometry for lane hazards
//!
//! Everything in the world is an axis-aligned box one row tall, so overlap
//! reduces to half-open intervals along x on a shared row.

use super::hazard::Hazard;
use crate::consts::RIDE_THRESHOLD;

/// The player always occupies one cell of width
pub const PLAYER_WIDTH: f32 = 1.0;

/// Strict overlap of `[a_left, a_right)` and `[b_left, b_right)`
///
/// Touching edges do not count.
#[inline]
pub fn intervals_overlap(a_left: f32, a_right: f32, b_left: f32, b_right: f32) -> bool {
    a_left < b_right && a_right > b_left
}

/// Length of the shared part of two intervals (0 when disjoint)
#[inline]
pub fn overlap_length(a_left: f32, a_right: f32, b_left: f32, b_right: f32) -> f32 {
    (a_right.min(b_right) - a_left.max(b_left)).max(0.0)
}

/// Does the player's cell box at `(x, y)` touch this hazard?
pub fn player_hits(hazard: &Hazard, x: f32, y: i32) -> bool {
    hazard.y == y && intervals_overlap(x, x + PLAYER_WIDTH, hazard.left(), hazard.right())
}

/// Is enough of the player resting on this hazard to ride it?
pub fn player_rides(hazard: &Hazard, x: f32, y: i32) -> bool {
    hazard.y == y
        && overlap_length(x, x + PLAYER_WIDTH, hazard.left(), hazard.right())
            >= PLAYER_WIDTH * RIDE_THRESHOLD
}
