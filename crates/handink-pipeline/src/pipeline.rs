//! Per-frame driver: landmark frames in, finished strokes out.
//!
//! [`InkPipeline`] owns all temporal state (smoothing history, the
//! stabilization counter, the stroke being drawn) and advances it once
//! per captured frame:
//!
//! ```rust
//! # use handink_pipeline::{
//! #     FinalizeOptions, InkConfig, InkError, InkPipeline, LandmarkFrame, ScaleMapping,
//! # };
//! # fn run(frames: Vec<Option<LandmarkFrame>>) -> Result<(), InkError> {
//! let mut pipeline = InkPipeline::new(
//!     InkConfig::default(),
//!     ScaleMapping::new(1920.0, 1080.0, true),
//!     || 0_u64,
//! )?;
//! let options = FinalizeOptions::default();
//!
//! for frame in &frames {
//!     let output = pipeline.process_frame(frame.as_ref(), &options);
//!     if let Some(stroke) = output.stroke {
//!         println!("{} stroke with {} points", stroke.kind, stroke.points.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each call completes classify, smooth, admit and (when drawing stops)
//! finalize before returning. Nothing is deferred to a later frame, and
//! nothing happens between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::diagnostics::SessionDiagnostics;
use crate::finalize::{FinalizeOptions, finalize};
use crate::gesture::{Gesture, GestureClassifier};
use crate::id::StrokeIdGenerator;
use crate::landmark::LandmarkFrame;
use crate::mapping::{CanvasMapping, ScaleMapping};
use crate::smooth::PositionSmoother;
use crate::stabilize::StabilizationController;
use crate::stroke::StrokeBuffer;
use crate::types::{FinishedStroke, InkConfig, InkError, InkPoint, Point};

/// What one frame produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// The frame's gesture, or `None` when no usable hand was present.
    pub gesture: Option<Gesture>,
    /// Cursor position in canvas coordinates, for pointer feedback.
    pub cursor: Option<Point>,
    /// The stroke finalized by this frame, if any.
    pub stroke: Option<FinishedStroke>,
}

/// Gesture-to-ink state machine for one drawing surface.
///
/// Not shareable between surfaces: use one instance per surface.
#[derive(Debug)]
pub struct InkPipeline<M = ScaleMapping, C = SystemClock> {
    config: InkConfig,
    mapping: M,
    clock: C,
    classifier: GestureClassifier,
    smoother: PositionSmoother,
    stabilizer: StabilizationController,
    stroke: Option<StrokeBuffer>,
    ids: StrokeIdGenerator,
    cursor: Option<Point>,
    gesture: Option<Gesture>,
    diagnostics: SessionDiagnostics,
}

impl<M: CanvasMapping, C: Clock> InkPipeline<M, C> {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`InkError::InvalidConfig`] if `config` fails
    /// [`InkConfig::validate`].
    pub fn new(config: InkConfig, mapping: M, clock: C) -> Result<Self, InkError> {
        config.validate()?;
        let ids = StrokeIdGenerator::from_seed(clock.now_millis());
        Ok(Self {
            classifier: GestureClassifier::from_config(&config),
            smoother: PositionSmoother::from_config(&config),
            stabilizer: StabilizationController::from_config(&config),
            config,
            mapping,
            clock,
            stroke: None,
            ids,
            cursor: None,
            gesture: None,
            diagnostics: SessionDiagnostics::default(),
        })
    }

    /// Advance by one captured frame.
    ///
    /// `None`, or a frame with fewer than 21 landmarks, means no hand:
    /// any stroke in progress is finalized and all filter state resets.
    pub fn process_frame(
        &mut self,
        frame: Option<&LandmarkFrame>,
        options: &FinalizeOptions,
    ) -> FrameOutput {
        self.diagnostics.frames += 1;

        let Some((frame, tip)) = frame
            .filter(|f| f.is_complete())
            .and_then(|f| f.index_tip().map(|tip| (f, tip)))
        else {
            return self.hand_lost(options);
        };

        let gesture = self.classifier.classify(frame);
        self.diagnostics.gestures.record(gesture);
        if self.gesture != Some(gesture) {
            debug!(
                from = self.gesture.map_or("none", Gesture::as_str),
                to = gesture.as_str(),
                "gesture changed"
            );
            self.gesture = Some(gesture);
        }

        let raw = self.mapping.to_canvas(tip);
        let stabilization = self.stabilizer.observe(gesture);

        let stroke = match gesture {
            Gesture::Draw => {
                let smoothed = self.smoother.update(raw);
                self.cursor = Some(smoothed);
                if stabilization.admits_ink() {
                    self.extend_stroke(smoothed);
                } else {
                    self.diagnostics.suppressed_frames += 1;
                }
                None
            }
            Gesture::Move | Gesture::Erase => {
                let stroke = self.finish_stroke(options);
                self.cursor = Some(self.smoother.update(raw));
                stroke
            }
            Gesture::Stop => {
                let stroke = self.finish_stroke(options);
                self.smoother.reset();
                self.cursor = Some(raw);
                stroke
            }
        };

        FrameOutput {
            gesture: Some(gesture),
            cursor: self.cursor,
            stroke,
        }
    }

    /// Abandon the current gesture on the host's request.
    ///
    /// A stroke with at least two points is still finalized and returned;
    /// anything shorter is dropped. Smoothing and stabilization restart
    /// from scratch either way.
    pub fn abort_stroke(&mut self, options: &FinalizeOptions) -> Option<FinishedStroke> {
        self.diagnostics.aborts += 1;
        debug!("stroke aborted");
        let stroke = self.finish_stroke(options);
        self.reset_filters();
        stroke
    }

    /// Cursor position after the most recent frame.
    #[must_use]
    pub const fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Points admitted to the stroke in progress, for live preview.
    #[must_use]
    pub fn current_stroke(&self) -> Option<&[InkPoint]> {
        self.stroke
            .as_ref()
            .filter(|buffer| !buffer.is_empty())
            .map(StrokeBuffer::points)
    }

    /// Whether a stroke is being drawn.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub const fn diagnostics(&self) -> &SessionDiagnostics {
        &self.diagnostics
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &InkConfig {
        &self.config
    }

    fn hand_lost(&mut self, options: &FinalizeOptions) -> FrameOutput {
        self.diagnostics.hand_lost_frames += 1;
        if self.gesture.is_some() {
            debug!("hand lost");
        }
        let stroke = self.finish_stroke(options);
        self.reset_filters();
        FrameOutput {
            gesture: None,
            cursor: None,
            stroke,
        }
    }

    fn extend_stroke(&mut self, position: Point) {
        let buffer = self.stroke.get_or_insert_with(|| {
            debug!(x = position.x, y = position.y, "stroke started");
            StrokeBuffer::from_config(&self.config)
        });
        if buffer.offer(position) {
            self.diagnostics.points_admitted += 1;
        } else {
            self.diagnostics.points_rejected += 1;
        }
    }

    fn finish_stroke(&mut self, options: &FinalizeOptions) -> Option<FinishedStroke> {
        let buffer = self.stroke.take()?;
        let admitted = buffer.len();
        let points = buffer.into_points();
        let Some(shaped) = finalize(&points, options, &self.config) else {
            self.diagnostics.discarded_strokes += 1;
            debug!(points = admitted, "stroke too short, discarded");
            return None;
        };

        let timestamp = self.clock.now_millis();
        let id = self.ids.next_id(timestamp);
        self.diagnostics.strokes.record(shaped.kind);
        debug!(
            %id,
            kind = %shaped.kind,
            admitted,
            points = shaped.points.len(),
            "stroke finalized"
        );
        Some(shaped.into_finished(id, &options.style, timestamp))
    }

    fn reset_filters(&mut self) {
        self.smoother.reset();
        self.stabilizer.reset();
        self.cursor = None;
        self.gesture = None;
    }
}
