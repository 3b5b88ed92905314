//! Session diagnostics: counts of what the pipeline did with each frame.
//!
//! These counters are permanent instrumentation intended for threshold
//! tuning. Every [`InkPipeline`](crate::InkPipeline) keeps one
//! [`SessionDiagnostics`] and updates it as frames are processed; it
//! serializes to JSON for offline comparison between runs.

use serde::{Deserialize, Serialize};

use crate::gesture::Gesture;
use crate::types::StrokeKind;

/// Counters accumulated over a pipeline's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDiagnostics {
    /// Frames processed, with or without a hand.
    pub frames: u64,
    /// Frames with no hand, or too few landmarks to classify.
    pub hand_lost_frames: u64,
    /// Classified frames per gesture.
    pub gestures: GestureCounts,
    /// `Draw` frames held back by stabilization.
    pub suppressed_frames: u64,
    /// Smoothed positions appended to a stroke.
    pub points_admitted: u64,
    /// Smoothed positions dropped for being too close to the last one.
    pub points_rejected: u64,
    /// Emitted strokes per kind.
    pub strokes: StrokeCounts,
    /// Buffers dropped at finalization for having fewer than two points.
    pub discarded_strokes: u64,
    /// Explicit aborts requested by the host.
    pub aborts: u64,
}

/// Per-gesture frame counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCounts {
    /// Index finger only.
    pub draw: u64,
    /// Index and middle fingers.
    pub r#move: u64,
    /// Thumb-index pinch.
    pub erase: u64,
    /// Anything else.
    pub stop: u64,
}

/// Per-kind emitted stroke counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeCounts {
    /// Freehand strokes and triangles.
    pub pen: u64,
    /// Straight segments.
    pub line: u64,
    /// Rectangles.
    pub rectangle: u64,
    /// Circles.
    pub ellipse: u64,
    /// Arrows.
    pub arrow: u64,
}

impl GestureCounts {
    /// Increment the counter for `gesture`.
    pub const fn record(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Draw => self.draw += 1,
            Gesture::Move => self.r#move += 1,
            Gesture::Erase => self.erase += 1,
            Gesture::Stop => self.stop += 1,
        }
    }
}

impl StrokeCounts {
    /// Increment the counter for `kind`.
    pub const fn record(&mut self, kind: StrokeKind) {
        match kind {
            StrokeKind::Pen => self.pen += 1,
            StrokeKind::Line => self.line += 1,
            StrokeKind::Rectangle => self.rectangle += 1,
            StrokeKind::Ellipse => self.ellipse += 1,
            StrokeKind::Arrow => self.arrow += 1,
        }
    }

    /// Total strokes emitted.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pen + self.line + self.rectangle + self.ellipse + self.arrow
    }
}

impl SessionDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Ink Session Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Frames: {}  |  Hand lost: {} ({:.1}%)",
            self.frames,
            self.hand_lost_frames,
            percent(self.hand_lost_frames, self.frames),
        ));
        lines.push(String::new());

        lines.push(format!("{:<24} {:>10} {:>10}", "Gesture", "Frames", "% Hand"));
        lines.push("-".repeat(60));
        let classified = self.frames.saturating_sub(self.hand_lost_frames);
        for (name, count) in [
            ("Draw", self.gestures.draw),
            ("Move", self.gestures.r#move),
            ("Erase", self.gestures.erase),
            ("Stop", self.gestures.stop),
        ] {
            lines.push(format!(
                "{name:<24} {count:>10} {:>9.1}%",
                percent(count, classified)
            ));
        }
        lines.push(String::new());

        lines.push(format!(
            "Stabilization: {} draw frames suppressed",
            self.suppressed_frames,
        ));
        lines.push(format!(
            "Admission: {} admitted, {} rejected ({:.1}% kept)",
            self.points_admitted,
            self.points_rejected,
            percent(self.points_admitted, self.points_admitted + self.points_rejected),
        ));
        lines.push(String::new());

        lines.push(format!("{:<24} {:>10}", "Stroke kind", "Count"));
        lines.push("-".repeat(60));
        for kind in [
            StrokeKind::Pen,
            StrokeKind::Line,
            StrokeKind::Rectangle,
            StrokeKind::Ellipse,
            StrokeKind::Arrow,
        ] {
            lines.push(format!("{:<24} {:>10}", kind.as_str(), self.stroke_count(kind)));
        }
        lines.push(String::new());
        lines.push(format!(
            "Strokes emitted: {}  |  Discarded: {}  |  Aborts: {}",
            self.strokes.total(),
            self.discarded_strokes,
            self.aborts,
        ));

        lines.join("\n")
    }

    /// Emitted strokes of `kind`.
    #[must_use]
    pub const fn stroke_count(&self, kind: StrokeKind) -> u64 {
        match kind {
            StrokeKind::Pen => self.strokes.pen,
            StrokeKind::Line => self.strokes.line,
            StrokeKind::Rectangle => self.strokes.rectangle,
            StrokeKind::Ellipse => self.strokes.ellipse,
            StrokeKind::Arrow => self.strokes.arrow,
        }
    }
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / whole as f64;
    ratio * 100.0
}
