//! Shared types for the handink gesture-to-ink pipeline.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// Used both for normalized frame coordinates (before the canvas
/// mapping) and for canvas coordinates (after it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downward).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Length of this point treated as a vector from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product, treating both points as vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Z component of the 2D cross product, treating both points as vectors.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Anything that has a 2D position.
///
/// Lets the geometry and simplification code run over both bare
/// [`Point`]s and pressure-carrying [`InkPoint`]s.
pub trait Positioned {
    /// The 2D position of this item.
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// A committed ink sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    /// Horizontal canvas position.
    pub x: f64,
    /// Vertical canvas position.
    pub y: f64,
    /// Pen pressure in `0.0..=1.0`.
    ///
    /// Hand landmarks carry no pressure signal, so this is always the
    /// configured placeholder ([`InkConfig::DEFAULT_INK_PRESSURE`]).
    pub pressure: f64,
}

impl InkPoint {
    /// Create an ink point at `position` with the given pressure.
    #[must_use]
    pub const fn new(position: Point, pressure: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            pressure,
        }
    }
}

impl Positioned for InkPoint {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x coordinate.
    pub min_x: f64,
    /// Smallest y coordinate.
    pub min_y: f64,
    /// Largest x coordinate.
    pub max_x: f64,
    /// Largest y coordinate.
    pub max_y: f64,
}

impl Bounds {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The four corners in drawing order (top-left, top-right,
    /// bottom-right, bottom-left) for a y-down coordinate system.
    #[must_use]
    pub const fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// The kind tag carried by a [`FinishedStroke`].
///
/// [`Arrow`](Self::Arrow) is part of the drawing-layer vocabulary but the
/// recognizer never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// Freehand ink (also used for recognized triangles).
    Pen,
    /// A straight two-point segment.
    Line,
    /// An idealized axis-aligned rectangle.
    Rectangle,
    /// A rasterized circle.
    Ellipse,
    /// An arrow. Never emitted by this pipeline.
    Arrow,
}

impl StrokeKind {
    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Arrow => "arrow",
        }
    }
}

impl fmt::Display for StrokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Opaque stroke identifier.
///
/// Rendered as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(pub u64);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Caller-supplied styling applied to every stroke emitted in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color, in whatever notation the drawing layer accepts
    /// (typically a CSS color such as `#1e1e1e`).
    pub color: String,
    /// Stroke width in canvas units.
    pub width: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            width: 2.0,
            opacity: 1.0,
        }
    }
}

/// A finished, classified stroke ready for the drawing layer.
///
/// Immutable once emitted; ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedStroke {
    /// Identifier unique within the emitting pipeline.
    pub id: StrokeId,
    /// What the stroke was classified as.
    pub kind: StrokeKind,
    /// The stroke's points in canvas coordinates.
    pub points: Vec<InkPoint>,
    /// Stroke color.
    pub color: String,
    /// Stroke width in canvas units.
    pub width: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Emission time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Configuration for the gesture-to-ink pipeline.
///
/// All parameters have defaults matching the tuned values the pipeline
/// was designed around. The corner-detection window, the corner spacing
/// rule and the admission spacing depend on each other through the
/// sampling density of admitted points; change them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkConfig {
    /// Number of consecutive `Draw` frames that are observed without
    /// committing ink. The frame after this many starts the stroke.
    pub stabilization_frames: u32,

    /// Capacity of the moving-average history (stage 1 smoothing).
    pub smoothing_window: usize,

    /// Exponential moving average factor (stage 2 smoothing), in `(0, 1]`.
    pub smoothing_factor: f64,

    /// Minimum canvas distance between consecutive admitted points.
    pub min_point_distance: f64,

    /// Thumb-to-index distance (normalized frame units) below which a
    /// frame counts as a pinch.
    pub pinch_threshold: f64,

    /// Placeholder pressure assigned to every ink point.
    pub ink_pressure: f64,

    /// Strokes whose bounding box is smaller than this on both axes are
    /// never classified as a shape.
    pub min_shape_size: f64,

    /// A stroke is closed when its endpoints are nearer than this.
    pub close_distance: f64,

    /// Smallest average radius accepted as a circle.
    pub circle_min_radius: f64,

    /// Largest `max |r - avg| / avg` accepted as a circle.
    pub circle_max_deviation: f64,

    /// Half-width, in samples, of the corner-detection window.
    pub corner_window: usize,

    /// Turning angle (radians) above which a sample is a corner.
    pub corner_angle: f64,

    /// Largest deviation (radians) from 90 degrees accepted at a
    /// rectangle corner.
    pub right_angle_tolerance: f64,

    /// Shortest start-to-end distance accepted as a recognized line.
    pub line_min_length: f64,

    /// Largest path-length to chord-length ratio accepted as a line.
    pub line_max_path_ratio: f64,

    /// Number of segments used to rasterize a recognized circle.
    pub circle_segments: usize,

    /// Angular distance (radians) from an axis within which a chord is
    /// snapped onto that axis.
    pub snap_angle_tolerance: f64,

    /// Largest point-to-chord distance, as a fraction of chord length,
    /// for a stroke to collapse to a straight segment.
    pub straightness_ratio: f64,

    /// Shortest chord eligible for snapping or collapsing.
    pub straight_min_length: f64,

    /// Ramer-Douglas-Peucker tolerance in canvas units.
    pub simplify_tolerance: f64,
}

impl InkConfig {
    /// Default for [`stabilization_frames`](Self::stabilization_frames).
    pub const DEFAULT_STABILIZATION_FRAMES: u32 = 3;
    /// Default for [`smoothing_window`](Self::smoothing_window).
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
    /// Default for [`smoothing_factor`](Self::smoothing_factor).
    pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.08;
    /// Default for [`min_point_distance`](Self::min_point_distance).
    pub const DEFAULT_MIN_POINT_DISTANCE: f64 = 15.0;
    /// Default for [`pinch_threshold`](Self::pinch_threshold).
    pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;
    /// Default for [`ink_pressure`](Self::ink_pressure).
    pub const DEFAULT_INK_PRESSURE: f64 = 0.5;
    /// Default for [`min_shape_size`](Self::min_shape_size).
    pub const DEFAULT_MIN_SHAPE_SIZE: f64 = 20.0;
    /// Default for [`close_distance`](Self::close_distance).
    pub const DEFAULT_CLOSE_DISTANCE: f64 = 30.0;
    /// Default for [`circle_min_radius`](Self::circle_min_radius).
    pub const DEFAULT_CIRCLE_MIN_RADIUS: f64 = 10.0;
    /// Default for [`circle_max_deviation`](Self::circle_max_deviation).
    pub const DEFAULT_CIRCLE_MAX_DEVIATION: f64 = 0.15;
    /// Default for [`corner_window`](Self::corner_window).
    pub const DEFAULT_CORNER_WINDOW: usize = 3;
    /// Default for [`corner_angle`](Self::corner_angle).
    pub const DEFAULT_CORNER_ANGLE: f64 = std::f64::consts::FRAC_PI_4;
    /// Default for [`right_angle_tolerance`](Self::right_angle_tolerance).
    pub const DEFAULT_RIGHT_ANGLE_TOLERANCE: f64 = 0.25;
    /// Default for [`line_min_length`](Self::line_min_length).
    pub const DEFAULT_LINE_MIN_LENGTH: f64 = 20.0;
    /// Default for [`line_max_path_ratio`](Self::line_max_path_ratio).
    pub const DEFAULT_LINE_MAX_PATH_RATIO: f64 = 1.2;
    /// Default for [`circle_segments`](Self::circle_segments).
    pub const DEFAULT_CIRCLE_SEGMENTS: usize = 36;
    /// Default for [`snap_angle_tolerance`](Self::snap_angle_tolerance).
    pub const DEFAULT_SNAP_ANGLE_TOLERANCE: f64 = 0.2;
    /// Default for [`straightness_ratio`](Self::straightness_ratio).
    pub const DEFAULT_STRAIGHTNESS_RATIO: f64 = 0.05;
    /// Default for [`straight_min_length`](Self::straight_min_length).
    pub const DEFAULT_STRAIGHT_MIN_LENGTH: f64 = 20.0;
    /// Default for [`simplify_tolerance`](Self::simplify_tolerance).
    pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 5.0;

    /// Check the configuration for values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`InkError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), InkError> {
        fn invalid(message: impl Into<String>) -> Result<(), InkError> {
            Err(InkError::InvalidConfig(message.into()))
        }

        if self.smoothing_window == 0 {
            return invalid("smoothing_window must be at least 1");
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return invalid(format!(
                "smoothing_factor must be in (0, 1], got {}",
                self.smoothing_factor
            ));
        }
        if self.corner_window == 0 {
            return invalid("corner_window must be at least 1");
        }
        if self.circle_segments < 3 {
            return invalid(format!(
                "circle_segments must be at least 3, got {}",
                self.circle_segments
            ));
        }
        if !(0.0..=1.0).contains(&self.ink_pressure) {
            return invalid(format!(
                "ink_pressure must be in [0, 1], got {}",
                self.ink_pressure
            ));
        }

        let distances = [
            ("min_point_distance", self.min_point_distance),
            ("pinch_threshold", self.pinch_threshold),
            ("min_shape_size", self.min_shape_size),
            ("close_distance", self.close_distance),
            ("circle_min_radius", self.circle_min_radius),
            ("circle_max_deviation", self.circle_max_deviation),
            ("corner_angle", self.corner_angle),
            ("right_angle_tolerance", self.right_angle_tolerance),
            ("line_min_length", self.line_min_length),
            ("line_max_path_ratio", self.line_max_path_ratio),
            ("snap_angle_tolerance", self.snap_angle_tolerance),
            ("straightness_ratio", self.straightness_ratio),
            ("straight_min_length", self.straight_min_length),
            ("simplify_tolerance", self.simplify_tolerance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                ));
            }
        }

        Ok(())
    }
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            stabilization_frames: Self::DEFAULT_STABILIZATION_FRAMES,
            smoothing_window: Self::DEFAULT_SMOOTHING_WINDOW,
            smoothing_factor: Self::DEFAULT_SMOOTHING_FACTOR,
            min_point_distance: Self::DEFAULT_MIN_POINT_DISTANCE,
            pinch_threshold: Self::DEFAULT_PINCH_THRESHOLD,
            ink_pressure: Self::DEFAULT_INK_PRESSURE,
            min_shape_size: Self::DEFAULT_MIN_SHAPE_SIZE,
            close_distance: Self::DEFAULT_CLOSE_DISTANCE,
            circle_min_radius: Self::DEFAULT_CIRCLE_MIN_RADIUS,
            circle_max_deviation: Self::DEFAULT_CIRCLE_MAX_DEVIATION,
            corner_window: Self::DEFAULT_CORNER_WINDOW,
            corner_angle: Self::DEFAULT_CORNER_ANGLE,
            right_angle_tolerance: Self::DEFAULT_RIGHT_ANGLE_TOLERANCE,
            line_min_length: Self::DEFAULT_LINE_MIN_LENGTH,
            line_max_path_ratio: Self::DEFAULT_LINE_MAX_PATH_RATIO,
            circle_segments: Self::DEFAULT_CIRCLE_SEGMENTS,
            snap_angle_tolerance: Self::DEFAULT_SNAP_ANGLE_TOLERANCE,
            straightness_ratio: Self::DEFAULT_STRAIGHTNESS_RATIO,
            straight_min_length: Self::DEFAULT_STRAIGHT_MIN_LENGTH,
            simplify_tolerance: Self::DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// Errors raised at the edges of the pipeline.
///
/// Per-frame processing never fails; only construction does.
#[derive(Debug, thiserror::Error)]
pub enum InkError {
    /// Pipeline configuration is invalid.
    #[error("invalid ink configuration: {0}")]
    InvalidConfig(String),
}
