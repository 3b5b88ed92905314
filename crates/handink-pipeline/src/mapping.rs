//! Frame-to-canvas coordinate mapping.
//!
//! Landmarks arrive in normalized frame space (`0.0..=1.0` on both axes).
//! The host decides how that space lands on its canvas; the pipeline only
//! needs a function from one to the other, applied before smoothing.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Maps a normalized frame position to canvas coordinates.
///
/// Implemented for any `Fn(Point) -> Point`, so hosts with an existing
/// transform can pass a closure.
pub trait CanvasMapping {
    /// Map one normalized frame position onto the canvas.
    fn to_canvas(&self, frame: Point) -> Point;
}

impl<F: Fn(Point) -> Point> CanvasMapping for F {
    fn to_canvas(&self, frame: Point) -> Point {
        self(frame)
    }
}

/// Stretch the unit frame over a `width` x `height` canvas.
///
/// With `mirror` set, x is flipped first, which is what a user facing a
/// front camera expects to see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapping {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Flip horizontally before scaling.
    #[serde(default)]
    pub mirror: bool,
}

impl ScaleMapping {
    /// Create a mapping onto a `width` x `height` canvas.
    #[must_use]
    pub const fn new(width: f64, height: f64, mirror: bool) -> Self {
        Self {
            width,
            height,
            mirror,
        }
    }
}

impl Default for ScaleMapping {
    fn default() -> Self {
        Self::new(1280.0, 720.0, true)
    }
}

impl CanvasMapping for ScaleMapping {
    fn to_canvas(&self, frame: Point) -> Point {
        let x = if self.mirror { 1.0 - frame.x } else { frame.x };
        Point::new(x * self.width, frame.y * self.height)
    }
}
