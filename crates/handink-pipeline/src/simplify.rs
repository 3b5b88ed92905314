//! Fallback path for strokes the shape recognizer did not claim:
//! straight-line snapping followed by Ramer-Douglas-Peucker simplification.
//!
//! [`snap_straight`] collapses nearly straight strokes to a two-point
//! segment (axis-aligned when the chord is close to an axis).
//! [`simplify`] reduces everything else to the points that carry its
//! shape. [`simplify_stroke`] applies both in order.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{distance_to_segment, path_length};
use crate::types::{InkConfig, InkPoint, Point, Positioned};

/// Chord angles a stroke snaps onto: the two axes, both directions.
const SNAP_ANGLES: [f64; 5] = [0.0, FRAC_PI_2, -FRAC_PI_2, PI, -PI];

/// Simplify a polyline using the Ramer-Douglas-Peucker algorithm.
///
/// Points within `tolerance` of the chord segment between the kept
/// points on either side are removed. A tolerance of 0.0 preserves all
/// points that are not exactly on the chord.
///
/// Polylines with fewer than 3 points are returned unchanged (nothing to
/// simplify).
#[must_use = "returns the simplified polyline"]
pub fn simplify<P: Positioned + Copy>(points: &[P], tolerance: f64) -> Vec<P> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let positions: Vec<Point> = points.iter().map(Positioned::position).collect();
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[points.len() - 1] = true;

    rdp_recurse(&positions, 0, points.len() - 1, tolerance, &mut kept);

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect()
}

/// Recursive step of the Ramer-Douglas-Peucker algorithm.
///
/// Finds the point between `start` and `end` that is farthest from the
/// segment between them. If that distance exceeds `tolerance`, the
/// point is kept and both sub-segments are processed recursively.
fn rdp_recurse(points: &[Point], start: usize, end: usize, tolerance: f64, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;

    for i in (start + 1)..end {
        let d = distance_to_segment(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, tolerance, kept);
        rdp_recurse(points, max_idx, end, tolerance, kept);
    }
}

/// Try to collapse a stroke to a straight two-point segment.
///
/// Only strokes of at least three points are considered:
///
/// 1. If the chord angle is within `config.snap_angle_tolerance` of an
///    axis, the end point is moved onto that axis (chord length kept).
///    Strokes that loop back on themselves are skipped here: their chord
///    is shorter than `config.close_distance` and under half the path
///    length, so its direction carries no meaning.
/// 2. Otherwise, if the chord is at least `config.straight_min_length`
///    long and every point is within `config.straightness_ratio` of the
///    chord length from the chord, the endpoints are kept as-is.
///
/// Returns `None` when neither applies.
#[must_use]
pub fn snap_straight(points: &[InkPoint], config: &InkConfig) -> Option<[InkPoint; 2]> {
    if points.len() < 3 {
        return None;
    }
    let (&first, &last) = (points.first()?, points.last()?);
    let start = first.position();
    let chord = last.position() - start;
    let length = chord.length();

    if !loops_back(points, length, config) {
        let angle = chord.y.atan2(chord.x);
        if let Some(&axis) = SNAP_ANGLES
            .iter()
            .find(|&&axis| (angle - axis).abs() < config.snap_angle_tolerance)
        {
            let end = start + Point::new(axis.cos(), axis.sin()) * length;
            return Some([first, InkPoint::new(end, last.pressure)]);
        }
    }

    if length < config.straight_min_length {
        return None;
    }
    let limit = length * config.straightness_ratio;
    let straight = points
        .iter()
        .all(|p| distance_to_segment(p.position(), start, last.position()) < limit);
    straight.then_some([first, last])
}

/// A stroke whose end returns near its start after travelling at least
/// twice the chord length. Always true for a zero-length chord.
fn loops_back(points: &[InkPoint], chord_length: f64, config: &InkConfig) -> bool {
    chord_length <= 0.0
        || (chord_length < config.close_distance && path_length(points) > 2.0 * chord_length)
}

/// Outcome of the fallback path.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback {
    /// The resulting points.
    pub points: Vec<InkPoint>,
    /// Whether the stroke was reduced to a straight two-point segment.
    pub collapsed: bool,
}

/// Run the fallback path: straight-line snap, then RDP on what is left.
///
/// Two-point input is already a straight segment and is returned
/// exactly as given.
#[must_use]
pub fn simplify_stroke(points: &[InkPoint], config: &InkConfig) -> Fallback {
    if points.len() <= 2 {
        return Fallback {
            points: points.to_vec(),
            collapsed: points.len() == 2,
        };
    }

    if let Some(segment) = snap_straight(points, config) {
        return Fallback {
            points: segment.to_vec(),
            collapsed: true,
        };
    }

    Fallback {
        points: simplify(points, config.simplify_tolerance),
        collapsed: false,
    }
}
