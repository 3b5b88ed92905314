//! Gesture classification: map one landmark frame to a drawing intent.
//!
//! Classification is stateless. Everything temporal (how long a gesture
//! has been held) lives in [`crate::stabilize`].

use serde::{Deserialize, Serialize};

use crate::landmark::{
    INDEX_PIP, INDEX_TIP, LandmarkFrame, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_TIP,
};
use crate::types::InkConfig;

/// The intent expressed by a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// Index finger alone is extended: put ink down.
    Draw,
    /// Index and middle fingers extended: move the cursor without ink.
    Move,
    /// Thumb and index tips pinched together.
    Erase,
    /// Anything else, including incomplete frames.
    Stop,
}

impl Gesture {
    /// Short lowercase name for logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Move => "move",
            Self::Erase => "erase",
            Self::Stop => "stop",
        }
    }
}

/// Classifies landmark frames by finger extension and pinch distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    pinch_threshold: f64,
}

impl GestureClassifier {
    /// Create a classifier with the given pinch threshold (normalized
    /// frame units).
    #[must_use]
    pub const fn new(pinch_threshold: f64) -> Self {
        Self { pinch_threshold }
    }

    /// Create a classifier from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &InkConfig) -> Self {
        Self::new(config.pinch_threshold)
    }

    /// Classify one frame.
    ///
    /// Rules, first match wins:
    ///
    /// 1. Fewer than 21 landmarks: [`Gesture::Stop`].
    /// 2. Index extended, middle/ring/pinky folded: [`Gesture::Draw`].
    /// 3. Index and middle extended, ring/pinky folded: [`Gesture::Move`].
    /// 4. Thumb tip within the pinch threshold of the index tip:
    ///    [`Gesture::Erase`].
    /// 5. Otherwise [`Gesture::Stop`].
    ///
    /// A finger is extended when its tip is above its pip joint on screen.
    #[must_use]
    pub fn classify(&self, frame: &LandmarkFrame) -> Gesture {
        if !frame.is_complete() {
            return Gesture::Stop;
        }

        let extended = |tip: usize, pip: usize| match (frame.get(tip), frame.get(pip)) {
            (Some(t), Some(p)) => t.y < p.y,
            _ => false,
        };

        let index = extended(INDEX_TIP, INDEX_PIP);
        let middle = extended(MIDDLE_TIP, MIDDLE_PIP);
        let ring = extended(RING_TIP, RING_PIP);
        let pinky = extended(PINKY_TIP, PINKY_PIP);

        if index && !middle && !ring && !pinky {
            return Gesture::Draw;
        }
        if index && middle && !ring && !pinky {
            return Gesture::Move;
        }

        let pinched = match (frame.get(THUMB_TIP), frame.get(INDEX_TIP)) {
            (Some(thumb), Some(tip)) => {
                thumb.to_point().distance(tip.to_point()) < self.pinch_threshold
            }
            _ => false,
        };
        if pinched { Gesture::Erase } else { Gesture::Stop }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(InkConfig::DEFAULT_PINCH_THRESHOLD)
    }
}

/// Synthetic hand poses shared by unit and integration-style tests.
#[cfg(test)]
pub(crate) mod poses {
    use crate::landmark::{
        INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, Landmark, LandmarkFrame, MIDDLE_PIP, MIDDLE_TIP,
        PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_TIP,
    };

    /// Build a frame with the given fingers extended (index, middle,
    /// ring, pinky), the index tip at `tip`, and the thumb tip placed
    /// `thumb_gap` to the left of the index tip.
    pub fn hand(fingers: [bool; 4], tip: (f64, f64), thumb_gap: f64) -> LandmarkFrame {
        let mut lm = vec![Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
        let pairs = [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ];
        for (&(t, p), &up) in pairs.iter().zip(&fingers) {
            lm[p] = Landmark::new(0.5, 0.6, 0.0);
            lm[t] = Landmark::new(0.5, if up { 0.4 } else { 0.7 }, 0.0);
        }
        lm[INDEX_TIP].x = tip.0;
        lm[INDEX_TIP].y = tip.1;
        lm[INDEX_PIP].y = if fingers[0] { tip.1 + 0.1 } else { tip.1 - 0.1 };
        lm[THUMB_TIP] = Landmark::new(tip.0 - thumb_gap, tip.1, 0.0);
        LandmarkFrame::new(lm)
    }

    /// Index finger pointing, tip at `(x, y)`.
    pub fn draw(x: f64, y: f64) -> LandmarkFrame {
        hand([true, false, false, false], (x, y), 0.2)
    }

    /// Index and middle fingers up, tip at `(x, y)`.
    pub fn peace(x: f64, y: f64) -> LandmarkFrame {
        hand([true, true, false, false], (x, y), 0.2)
    }

    /// All fingers folded, thumb away from the index tip.
    pub fn fist(x: f64, y: f64) -> LandmarkFrame {
        hand([false, false, false, false], (x, y), 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::poses::{draw, fist, hand, peace};
    use super::*;
    use crate::landmark::Landmark;

    #[test]
    fn index_only_is_draw() {
        assert_eq!(GestureClassifier::default().classify(&draw(0.5, 0.3)), Gesture::Draw);
    }

    #[test]
    fn index_and_middle_is_move() {
        assert_eq!(GestureClassifier::default().classify(&peace(0.5, 0.3)), Gesture::Move);
    }

    #[test]
    fn extension_precedes_pinch() {
        // Index + middle extended with a 0.01 thumb gap: still Move.
        let frame = hand([true, true, false, false], (0.5, 0.3), 0.01);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Move);
    }

    #[test]
    fn pinch_with_folded_fingers_is_erase() {
        let frame = hand([false, false, false, false], (0.5, 0.5), 0.01);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Erase);
    }

    #[test]
    fn pinch_just_outside_threshold_is_stop() {
        let frame = hand([false, false, false, false], (0.5, 0.5), 0.06);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Stop);
    }

    #[test]
    fn fist_is_stop() {
        assert_eq!(GestureClassifier::default().classify(&fist(0.5, 0.5)), Gesture::Stop);
    }

    #[test]
    fn open_hand_is_stop() {
        let frame = hand([true, true, true, true], (0.5, 0.3), 0.2);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Stop);
    }

    #[test]
    fn index_with_ring_is_not_draw() {
        let frame = hand([true, false, true, false], (0.5, 0.3), 0.2);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Stop);
    }

    #[test]
    fn short_frame_is_stop() {
        let frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5, 0.0); 20]);
        assert_eq!(GestureClassifier::default().classify(&frame), Gesture::Stop);
        assert_eq!(
            GestureClassifier::default().classify(&LandmarkFrame::default()),
            Gesture::Stop
        );
    }

    #[test]
    fn custom_pinch_threshold() {
        let frame = hand([false, false, false, false], (0.5, 0.5), 0.08);
        assert_eq!(GestureClassifier::new(0.1).classify(&frame), Gesture::Erase);
    }

    #[test]
    fn gesture_names() {
        assert_eq!(Gesture::Draw.as_str(), "draw");
        assert_eq!(Gesture::Erase.as_str(), "erase");
    }
}
