//! Stroke finalization: decide what a finished buffer becomes.
//!
//! Policy, in order:
//!
//! 1. Fewer than two points: discarded.
//! 2. Straight-line mode: `[first, last]` as a [`StrokeKind::Line`].
//! 3. Shape recognition (when enabled): the recognized shape's idealized
//!    points, tagged with the shape's kind.
//! 4. Fallback: straight-line snap, then RDP. A [`StrokeKind::Line`] if
//!    the snap collapsed the stroke, otherwise [`StrokeKind::Pen`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recognize::recognize;
use crate::simplify::simplify_stroke;
use crate::types::{FinishedStroke, InkConfig, InkPoint, StrokeId, StrokeKind, StrokeStyle};

/// Caller-controlled toggles consulted when a stroke is finalized.
///
/// Passed into every [`InkPipeline::process_frame`](crate::InkPipeline::process_frame)
/// call rather than stored, so the host can flip them at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeOptions {
    /// Reduce every stroke to its endpoints, skipping recognition.
    pub straight_line_mode: bool,
    /// Try to recognize shapes before falling back to simplification.
    pub shape_recognition: bool,
    /// Styling stamped onto emitted strokes.
    pub style: StrokeStyle,
}

impl Default for FinalizeOptions {
    fn default() -> Self {
        Self {
            straight_line_mode: false,
            shape_recognition: true,
            style: StrokeStyle::default(),
        }
    }
}

/// Geometry and kind of a finalized stroke, before identity and styling
/// are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedStroke {
    /// Stored stroke kind.
    pub kind: StrokeKind,
    /// Final points.
    pub points: Vec<InkPoint>,
}

impl ShapedStroke {
    /// Attach identity, styling, and creation time.
    #[must_use]
    pub fn into_finished(
        self,
        id: StrokeId,
        style: &StrokeStyle,
        timestamp: u64,
    ) -> FinishedStroke {
        FinishedStroke {
            id,
            kind: self.kind,
            points: self.points,
            color: style.color.clone(),
            width: style.width,
            opacity: style.opacity,
            timestamp,
        }
    }
}

/// Turn a finished point buffer into its stored form.
///
/// Returns `None` when the buffer holds fewer than two points.
#[must_use]
pub fn finalize(
    points: &[InkPoint],
    options: &FinalizeOptions,
    config: &InkConfig,
) -> Option<ShapedStroke> {
    let (&first, &last) = match points {
        [first, .., last] => (first, last),
        _ => return None,
    };

    if options.straight_line_mode {
        return Some(ShapedStroke {
            kind: StrokeKind::Line,
            points: vec![first, last],
        });
    }

    if options.shape_recognition
        && let Some(shape) = recognize(points, config)
    {
        debug!(shape = ?shape, "recognized shape");
        return Some(ShapedStroke {
            kind: shape.stroke_kind(),
            points: shape.to_ink_points(first.pressure, config.circle_segments),
        });
    }

    let fallback = simplify_stroke(points, config);
    Some(ShapedStroke {
        kind: if fallback.collapsed {
            StrokeKind::Line
        } else {
            StrokeKind::Pen
        },
        points: fallback.points,
    })
}
