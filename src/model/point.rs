//! Timestamped 2D input points

use serde::{Deserialize, Serialize};

/// A single captured input point: screen position plus capture timestamp
/// in milliseconds. Created by the input-capture layer; immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    pub x: f32,
    pub y: f32,
    pub timestamp: i64,
}

impl TimedPoint {
    pub fn new(x: f32, y: f32, timestamp: i64) -> Self {
        Self { x, y, timestamp }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &TimedPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
