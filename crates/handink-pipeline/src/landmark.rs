//! Hand landmark frames as delivered by the external landmark detector.
//!
//! A frame holds one tracked hand as 21 points in normalized frame space
//! (x and y in `[0, 1]`, y growing downward; z is relative depth and is
//! not used for classification).

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Number of landmarks in a complete hand frame.
pub const LANDMARK_COUNT: usize = 21;

/// Base of the palm.
pub const WRIST: usize = 0;
/// Thumb joint below the tip.
pub const THUMB_IP: usize = 3;
/// Thumb tip, one side of the pinch gap.
pub const THUMB_TIP: usize = 4;
/// Index finger middle joint.
pub const INDEX_PIP: usize = 6;
/// Index fingertip, the drawing point.
pub const INDEX_TIP: usize = 8;
/// Middle finger middle joint.
pub const MIDDLE_PIP: usize = 10;
/// Middle fingertip.
pub const MIDDLE_TIP: usize = 12;
/// Ring finger middle joint.
pub const RING_PIP: usize = 14;
/// Ring fingertip.
pub const RING_TIP: usize = 16;
/// Pinky middle joint.
pub const PINKY_PIP: usize = 18;
/// Pinky fingertip.
pub const PINKY_TIP: usize = 20;

/// A single tracked point on the hand.
///
/// Serialized as an `[x, y, z]` array so recordings stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Landmark {
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position (grows downward).
    pub y: f64,
    /// Relative depth.
    pub z: f64,
}

impl Landmark {
    /// Create a landmark.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The landmark projected onto the image plane.
    #[must_use]
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<[f64; 3]> for Landmark {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f64; 3] {
    fn from(l: Landmark) -> Self {
        [l.x, l.y, l.z]
    }
}

/// One frame of landmarks for a single hand.
///
/// The detector normally delivers exactly [`LANDMARK_COUNT`] points. A
/// frame with fewer is accepted but treated as "no usable hand" by the
/// classifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame(Vec<Landmark>);

impl LandmarkFrame {
    /// Wrap the detector's landmark list.
    #[must_use]
    pub const fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    /// Number of landmarks in the frame.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the frame has no landmarks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the frame carries the full hand skeleton.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.0.len() >= LANDMARK_COUNT
    }

    /// The landmark at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.0.get(index).copied()
    }

    /// All landmarks.
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.0
    }

    /// Index fingertip on the image plane: the point that draws.
    #[must_use]
    pub fn index_tip(&self) -> Option<Point> {
        self.get(INDEX_TIP).map(Landmark::to_point)
    }
}

impl From<Vec<Landmark>> for LandmarkFrame {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }
}
