//! handink-pipeline: Pure gesture-to-vector-ink pipeline (sans-IO).
//!
//! Converts a per-frame stream of hand landmarks into finished vector
//! strokes through:
//! gesture classification -> stabilization -> smoothing -> admission ->
//! (on release) shape recognition or straight-line snap + simplification.
//!
//! This crate has **no I/O dependencies** -- it consumes landmark frames
//! already produced by a detector and returns structured stroke records.
//! Capture, detection, rendering, and persistence all live with the host.
//!
//! The entry point is [`InkPipeline`]; the stages are exposed as modules
//! so each can be driven and tested on its own.

pub mod admit;
pub mod clock;
pub mod diagnostics;
pub mod finalize;
pub mod geometry;
pub mod gesture;
pub mod id;
pub mod landmark;
pub mod mapping;
pub mod pipeline;
pub mod recognize;
pub mod simplify;
pub mod smooth;
pub mod stabilize;
pub mod stroke;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use diagnostics::SessionDiagnostics;
pub use finalize::{FinalizeOptions, ShapedStroke, finalize};
pub use gesture::{Gesture, GestureClassifier};
pub use landmark::{Landmark, LandmarkFrame};
pub use mapping::{CanvasMapping, ScaleMapping};
pub use pipeline::{FrameOutput, InkPipeline};
pub use recognize::{RecognizedShape, recognize};
pub use types::{
    Bounds, FinishedStroke, InkConfig, InkError, InkPoint, Point, StrokeId, StrokeKind,
    StrokeStyle,
};
