//! The in-progress stroke: admitted ink points in drawing order.

use crate::admit::AdmissionFilter;
use crate::types::{InkConfig, InkPoint, Point};

/// Ordered admitted points for the stroke currently being drawn.
///
/// Owns its own [`AdmissionFilter`] so spacing is always measured
/// against this stroke's last point, never a previous stroke's.
#[derive(Debug, Clone)]
pub struct StrokeBuffer {
    points: Vec<InkPoint>,
    admission: AdmissionFilter,
    pressure: f64,
}

impl StrokeBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new(admission: AdmissionFilter, pressure: f64) -> Self {
        Self {
            points: Vec::new(),
            admission,
            pressure,
        }
    }

    /// Create an empty buffer from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &InkConfig) -> Self {
        Self::new(AdmissionFilter::from_config(config), config.ink_pressure)
    }

    /// Offer a smoothed canvas position. Appends and returns `true` if
    /// the admission filter accepts it.
    pub fn offer(&mut self, position: Point) -> bool {
        let admitted = self.admission.admit(position);
        if admitted {
            self.points.push(InkPoint::new(position, self.pressure));
        }
        admitted
    }

    /// Admitted points so far.
    #[must_use]
    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    /// Number of admitted points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if nothing has been admitted yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the buffer and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<InkPoint> {
        self.points
    }
}
