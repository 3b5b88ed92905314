//! Shape recognition: classify a finished stroke as a circle, rectangle,
//! triangle or line, and substitute an idealized version of it.
//!
//! The tests run in a fixed order on the stroke's points:
//!
//! 1. Size gate: strokes smaller than `min_shape_size` on both axes are
//!    never shapes.
//! 2. Circle (closed strokes): every point roughly equidistant from the
//!    centroid.
//! 3. Corner detection: windowed turning angle along the path.
//! 4. Rectangle (closed, 5 corners counting both ends, right angles).
//! 5. Triangle (closed, 4 corners counting both ends).
//! 6. Line (open, no interior corners, nearly as short as its chord).
//!
//! The corner window and spacing assume the point density produced by
//! admission (`min_point_distance`); the three are tuned together.

use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::trace;

use crate::geometry::{angle_between, bounding_box, centroid, path_length};
use crate::types::{Bounds, InkConfig, InkPoint, Point, Positioned, StrokeKind};

/// A stroke recognized as one of the supported shapes.
///
/// Transient: the finalizer converts it to ink points immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedShape {
    /// Axis-aligned rectangle; `points` walks the corners and closes.
    Rectangle {
        /// Top-left, top-right, bottom-right, bottom-left, top-left.
        points: [Point; 5],
        /// The stroke's bounding box the rectangle was derived from.
        bounds: Bounds,
    },
    /// Circle around the stroke's centroid.
    Circle {
        /// Centroid of the stroke.
        center: Point,
        /// Average distance from the centroid.
        radius: f64,
    },
    /// Triangle through the three detected corners, closing on the first.
    Triangle {
        /// Three corners followed by the first again.
        points: [Point; 4],
    },
    /// Straight segment between the stroke's endpoints.
    Line {
        /// First point of the stroke.
        start: Point,
        /// Last point of the stroke.
        end: Point,
    },
}

impl RecognizedShape {
    /// The stroke kind this shape is stored as.
    ///
    /// Triangles have no dedicated kind and are stored as freehand ink.
    #[must_use]
    pub const fn stroke_kind(&self) -> StrokeKind {
        match self {
            Self::Rectangle { .. } => StrokeKind::Rectangle,
            Self::Circle { .. } => StrokeKind::Ellipse,
            Self::Triangle { .. } => StrokeKind::Pen,
            Self::Line { .. } => StrokeKind::Line,
        }
    }

    /// Convert to ink points.
    ///
    /// Circles are rasterized into a closed polyline of `circle_segments`
    /// segments (`circle_segments + 1` points, the last equal to the
    /// first).
    #[must_use]
    pub fn to_ink_points(&self, pressure: f64, circle_segments: usize) -> Vec<InkPoint> {
        let ink = |p: Point| InkPoint::new(p, pressure);
        match self {
            Self::Rectangle { points, .. } => points.iter().copied().map(ink).collect(),
            Self::Triangle { points } => points.iter().copied().map(ink).collect(),
            Self::Line { start, end } => vec![ink(*start), ink(*end)],
            Self::Circle { center, radius } => {
                let segments = circle_segments.max(3);
                #[allow(clippy::cast_precision_loss)]
                let step = TAU / segments as f64;
                let mut points: Vec<InkPoint> = (0..segments)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let theta = step * i as f64;
                        ink(*center + Point::new(theta.cos(), theta.sin()) * *radius)
                    })
                    .collect();
                if let Some(&first) = points.first() {
                    points.push(first);
                }
                points
            }
        }
    }
}

/// Classify a finished stroke.
///
/// Returns `None` when the stroke has fewer than three points, is too
/// small, or matches no shape.
#[must_use]
pub fn recognize(points: &[InkPoint], config: &InkConfig) -> Option<RecognizedShape> {
    if points.len() < 3 {
        return None;
    }
    let path: Vec<Point> = points.iter().map(Positioned::position).collect();

    let bounds = bounding_box(&path)?;
    if bounds.width() < config.min_shape_size && bounds.height() < config.min_shape_size {
        return None;
    }

    let (&start, &end) = (path.first()?, path.last()?);
    let closed = start.distance(end) < config.close_distance;

    if closed && let Some(circle) = fit_circle(&path, config) {
        return Some(circle);
    }

    let corners = detect_corners(&path, config.corner_window, config.corner_angle);
    trace!(corners = corners.len(), closed, "corner detection");

    if closed {
        if corners.len() == 5 && has_right_angles(&path, &corners, config.right_angle_tolerance) {
            let [tl, tr, br, bl] = bounds.corners();
            return Some(RecognizedShape::Rectangle {
                points: [tl, tr, br, bl, tl],
                bounds,
            });
        }
        if corners.len() == 4 {
            let [a, b, c] = [path[corners[0]], path[corners[1]], path[corners[2]]];
            return Some(RecognizedShape::Triangle {
                points: [a, b, c, a],
            });
        }
        return None;
    }

    let direct = start.distance(end);
    if corners.len() <= 2
        && direct >= config.line_min_length
        && path_length(&path) / direct < config.line_max_path_ratio
    {
        return Some(RecognizedShape::Line { start, end });
    }

    None
}

/// Accept the path as a circle when every point is close to the average
/// distance from the centroid.
fn fit_circle(path: &[Point], config: &InkConfig) -> Option<RecognizedShape> {
    let center = centroid(path)?;
    let radii: Vec<f64> = path.iter().map(|p| p.distance(center)).collect();
    #[allow(clippy::cast_precision_loss)]
    let radius = radii.iter().sum::<f64>() / radii.len() as f64;
    if radius < config.circle_min_radius {
        return None;
    }

    let max_deviation = radii
        .iter()
        .map(|r| (r - radius).abs())
        .fold(0.0, f64::max);
    (max_deviation / radius < config.circle_max_deviation)
        .then_some(RecognizedShape::Circle { center, radius })
}

/// Indices where the path turns sharply.
///
/// At each index with `window` samples on both sides, the turning angle
/// is measured between the incoming direction (from `window` samples
/// back) and the outgoing direction (to `window` samples ahead). An index
/// is a corner when that angle exceeds `angle_threshold` and it lies more
/// than `2 * window` samples past the previous corner. The first and last
/// indices are always corners.
#[must_use]
pub fn detect_corners(path: &[Point], window: usize, angle_threshold: f64) -> Vec<usize> {
    if path.is_empty() {
        return Vec::new();
    }
    let last = path.len() - 1;
    let mut corners = vec![0];
    if last == 0 {
        return corners;
    }

    let mut previous = 0;
    for i in window..path.len().saturating_sub(window) {
        let incoming = path[i] - path[i - window];
        let outgoing = path[i + window] - path[i];
        let turn = angle_between(incoming, outgoing);
        if turn.abs() > angle_threshold && i - previous > 2 * window {
            corners.push(i);
            previous = i;
        }
    }

    corners.push(last);
    corners
}

/// Whether the four distinct corners of a closed path all turn by
/// roughly 90 degrees.
///
/// `corners` holds five indices: the start, three detected corners and
/// the end, which coincides (roughly) with the start.
fn has_right_angles(path: &[Point], corners: &[usize], tolerance: f64) -> bool {
    let vertices: Vec<Point> = corners.iter().take(4).map(|&i| path[i]).collect();
    let n = vertices.len();
    (0..n).all(|k| {
        let prev = vertices[(k + n - 1) % n];
        let here = vertices[k];
        let next = vertices[(k + 1) % n];
        let turn = angle_between(here - prev, next - here);
        (turn.abs() - FRAC_PI_2).abs() < tolerance
    })
}
