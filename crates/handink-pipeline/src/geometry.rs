//! Geometry primitives shared by the recognizer and the simplifier.
//!
//! Everything here is a pure function over points in canvas space.

use crate::types::{Bounds, Point, Positioned};

/// Distance from point `p` to the segment between `a` and `b`.
///
/// The perpendicular distance when the foot of the perpendicular falls
/// inside the segment, otherwise the distance to the nearer endpoint.
/// When `a` and `b` coincide, returns the distance from `p` to `a`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_sq = ab.dot(ab);

    if length_sq == 0.0 {
        // a and b are the same point.
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Arithmetic mean of the points' positions.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn centroid<P: Positioned>(points: &[P]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Point::new(0.0, 0.0), |acc, p| acc + p.position());
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Some(Point::new(sum.x / n, sum.y / n))
}

/// Axis-aligned bounding box of the points.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bounding_box<P: Positioned>(points: &[P]) -> Option<Bounds> {
    let first = points.first()?.position();
    let init = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    Some(points.iter().skip(1).fold(init, |b, p| {
        let p = p.position();
        Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }
    }))
}

/// Signed angle in radians that rotates direction `from` onto direction
/// `to`, in `[-pi, pi]`.
///
/// Positive is clockwise on screen (y grows downward). Returns `0.0` if
/// either vector has zero length.
#[must_use]
pub fn angle_between(from: Point, to: Point) -> f64 {
    from.cross(to).atan2(from.dot(to))
}

/// Total length of the polyline through the points, in order.
#[must_use]
pub fn path_length<P: Positioned>(points: &[P]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].position().distance(w[1].position()))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::types::InkPoint;

    #[test]
    fn segment_distance_on_axis() {
        // Point (1, 3) is 3 units from the segment (0,0)-(2,0).
        let d = distance_to_segment(
            Point::new(1.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-10);
    }

    #[test]
    fn segment_distance_diagonal_segment() {
        // Point (2, -1) is 8 / sqrt(20) from segment (0,0)->(4,2); the
        // foot of the perpendicular lies inside the segment.
        let d = distance_to_segment(
            Point::new(2.0, -1.0),
            Point::new(0.0, 0.0),
            Point::new(4.0, 2.0),
        );
        let expected = 8.0 / 20.0_f64.sqrt();
        assert!((d - expected).abs() < 1e-10, "got {d}, expected {expected}");
    }

    #[test]
    fn segment_distance_beyond_endpoint() {
        // Collinear but past the end: distance to the endpoint, not zero.
        let d = distance_to_segment(
            Point::new(14.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 4.0).abs() < 1e-10);
    }

    #[test]
    fn segment_distance_coincident_endpoints() {
        let d = distance_to_segment(
            Point::new(3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(centroid(&pts), Some(Point::new(5.0, 5.0)));
        assert_eq!(centroid::<Point>(&[]), None);
    }

    #[test]
    fn bounding_box_of_ink_points() {
        let pts = [
            InkPoint::new(Point::new(3.0, -2.0), 0.5),
            InkPoint::new(Point::new(-1.0, 7.0), 0.5),
            InkPoint::new(Point::new(5.0, 1.0), 0.5),
        ];
        let b = bounding_box(&pts).unwrap();
        assert!((b.min_x + 1.0).abs() < f64::EPSILON);
        assert!((b.min_y + 2.0).abs() < f64::EPSILON);
        assert!((b.max_x - 5.0).abs() < f64::EPSILON);
        assert!((b.max_y - 7.0).abs() < f64::EPSILON);
        assert!(bounding_box::<InkPoint>(&[]).is_none());
    }

    #[test]
    fn angle_between_quarter_turns() {
        let right = Point::new(1.0, 0.0);
        let down = Point::new(0.0, 1.0);
        assert!((angle_between(right, down) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_between(down, right) + FRAC_PI_2).abs() < 1e-12);
        assert!(angle_between(right, right).abs() < 1e-12);
        assert!((angle_between(right, Point::new(-1.0, 0.0)).abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn angle_between_zero_vector_is_zero() {
        assert!(angle_between(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ];
        assert!((path_length(&pts) - 11.0).abs() < 1e-12);
        assert!(path_length::<Point>(&[]).abs() < f64::EPSILON);
    }
}
