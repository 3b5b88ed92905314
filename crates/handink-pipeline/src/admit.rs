//! Point admission: thin the smoothed fingertip path to a useful density.
//!
//! Smoothing reduces jitter amplitude; admission reduces point count. A
//! point is kept only when it is far enough from the last point that was
//! kept (not from the last point that was offered).

use tracing::trace;

use crate::types::{InkConfig, Point};

/// Minimum-spacing filter against the last admitted point.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    min_distance: f64,
    last_admitted: Option<Point>,
}

impl AdmissionFilter {
    /// Create a filter requiring `min_distance` between admitted points.
    #[must_use]
    pub const fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            last_admitted: None,
        }
    }

    /// Create a filter from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &InkConfig) -> Self {
        Self::new(config.min_point_distance)
    }

    /// Offer a point. Returns `true` and remembers it if admitted.
    ///
    /// The first point offered after construction is always admitted.
    pub fn admit(&mut self, point: Point) -> bool {
        let admitted = self
            .last_admitted
            .is_none_or(|last| last.distance(point) >= self.min_distance);
        if admitted {
            self.last_admitted = Some(point);
        } else {
            trace!(x = point.x, y = point.y, "point too close to previous ink, skipped");
        }
        admitted
    }
}

impl Default for AdmissionFilter {
    fn default() -> Self {
        Self::new(InkConfig::DEFAULT_MIN_POINT_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_always_admitted() {
        let mut f = AdmissionFilter::default();
        assert!(f.admit(Point::new(0.0, 0.0)));
    }

    #[test]
    fn close_points_rejected() {
        let mut f = AdmissionFilter::default();
        f.admit(Point::new(0.0, 0.0));
        assert!(!f.admit(Point::new(10.0, 0.0)));
        assert!(!f.admit(Point::new(14.9, 0.0)));
        assert!(f.admit(Point::new(15.0, 0.0)));
    }

    #[test]
    fn distance_measured_from_last_admitted() {
        // Creeping 10 units per step: measured from the last admitted
        // point, every second step crosses the threshold.
        let mut f = AdmissionFilter::default();
        let admitted: Vec<bool> = (0..7)
            .map(|i| f.admit(Point::new(f64::from(i) * 10.0, 0.0)))
            .collect();
        assert_eq!(admitted, vec![true, false, true, false, true, false, true]);
    }

    #[test]
    fn admitted_points_respect_spacing() {
        let mut f = AdmissionFilter::default();
        let mut kept: Vec<Point> = Vec::new();
        for i in 0..200 {
            let t = f64::from(i) * 0.1;
            let p = Point::new(t.cos() * 80.0 + t * 3.0, t.sin() * 60.0);
            if f.admit(p) {
                kept.push(p);
            }
        }
        assert!(kept.len() > 2);
        for w in kept.windows(2) {
            assert!(w[0].distance(w[1]) >= 15.0);
        }
    }
}
