//! The player
//!
//! The player hops between integer cells. Only while riding a log does `x`
//! drift off the grid; the next hop snaps it back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: i32,
    /// Lowest row index reached so far (lower is further)
    pub max_row_reached: i32,
    pub start_x: i32,
    pub start_row: i32,
}

impl Player {
    pub fn new(start_x: i32, start_row: i32) -> Self {
        Self {
            x: start_x as f32,
            y: start_row,
            max_row_reached: start_row,
            start_x,
            start_row,
        }
    }

    /// Cell a hop of `(dx, dy)` would land on, from the truncated position
    pub fn target_cell(&self, dx: i32, dy: i32) -> (i32, i32) {
        (self.x.trunc() as i32 + dx, self.y + dy)
    }

    /// Hop by `(dx, dy)` if the target lies inside `[0, width) × [0, height)`
    ///
    /// Returns whether the hop happened. Blocked cells are the caller's
    /// concern; out-of-bounds hops are silently ignored.
    pub fn move_by(&mut self, dx: i32, dy: i32, width: i32, height: i32) -> bool {
        let (new_x, new_y) = self.target_cell(dx, dy);
        if !(0..width).contains(&new_x) || !(0..height).contains(&new_y) {
            return false;
        }
        self.x = new_x as f32;
        self.y = new_y;
        self.max_row_reached = self.max_row_reached.min(new_y);
        true
    }

    /// Drift with a log for one tick
    pub fn carry(&mut self, velocity: f32, dt: f32) {
        self.x += velocity * dt;
    }

    /// Rows advanced past the start row
    pub fn score(&self) -> u32 {
        (self.start_row - self.max_row_reached).max(0) as u32
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.start_x, self.start_row);
    }
}
