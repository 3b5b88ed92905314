//! Stabilization: hold back ink until `Draw` has persisted.
//!
//! Detectors misclassify single frames, most often while the hand is
//! changing pose. Requiring several consecutive `Draw` frames before ink
//! is committed keeps those frames from starting spurious strokes.

use crate::gesture::Gesture;
use crate::types::InkConfig;

/// What the controller decided for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stabilization {
    /// The frame's gesture is not `Draw`; the counter was reset.
    Idle,
    /// `Draw` is held but not yet long enough. `frames` counts this frame.
    Pending {
        /// Consecutive `Draw` frames so far, including this one.
        frames: u32,
    },
    /// `Draw` has persisted past the threshold; ink may be committed.
    Stable,
}

impl Stabilization {
    /// Whether this frame may contribute ink.
    #[must_use]
    pub const fn admits_ink(self) -> bool {
        matches!(self, Self::Stable)
    }
}

/// Counts consecutive `Draw` frames.
#[derive(Debug, Clone)]
pub struct StabilizationController {
    threshold: u32,
    consecutive: u32,
}

impl StabilizationController {
    /// Create a controller that suppresses the first `threshold`
    /// consecutive `Draw` frames.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            consecutive: 0,
        }
    }

    /// Create a controller from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &InkConfig) -> Self {
        Self::new(config.stabilization_frames)
    }

    /// Observe one frame's gesture.
    pub const fn observe(&mut self, gesture: Gesture) -> Stabilization {
        if !matches!(gesture, Gesture::Draw) {
            self.consecutive = 0;
            return Stabilization::Idle;
        }

        self.consecutive = self.consecutive.saturating_add(1);
        if self.consecutive > self.threshold {
            Stabilization::Stable
        } else {
            Stabilization::Pending {
                frames: self.consecutive,
            }
        }
    }

    /// Consecutive `Draw` frames observed so far.
    #[must_use]
    pub const fn consecutive(&self) -> u32 {
        self.consecutive
    }

    /// Forget any held `Draw` run.
    pub const fn reset(&mut self) {
        self.consecutive = 0;
    }
}

impl Default for StabilizationController {
    fn default() -> Self {
        Self::new(InkConfig::DEFAULT_STABILIZATION_FRAMES)
    }
}
