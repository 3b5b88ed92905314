//! Two-stage position smoothing for the fingertip cursor.
//!
//! Stage 1 is a [`MovingAverage`] over the last few raw positions, which
//! removes frame-to-frame detector jitter. Stage 2 is an
//! [`ExponentialSmoother`] over the stage 1 output, which trades a little
//! latency for a steady line. [`PositionSmoother`] composes the two.
//!
//! All positions are in canvas coordinates: the raw fingertip is mapped
//! to the canvas before it reaches the smoother.

use std::collections::VecDeque;

use crate::types::{InkConfig, Point};

/// Fixed-capacity moving average over the most recent points.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    history: VecDeque<Point>,
    capacity: usize,
}

impl MovingAverage {
    /// Create an empty average over at most `capacity` points.
    ///
    /// A capacity of zero is treated as one (no averaging).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a point, evicting the oldest beyond capacity, and return the
    /// mean of the retained history.
    pub fn push(&mut self, point: Point) -> Point {
        self.history.push_back(point);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.mean().unwrap_or(point)
    }

    /// Mean of the retained history, or `None` if empty.
    #[must_use]
    pub fn mean(&self) -> Option<Point> {
        if self.history.is_empty() {
            return None;
        }
        let sum = self
            .history
            .iter()
            .fold(Point::new(0.0, 0.0), |acc, &p| acc + p);
        #[allow(clippy::cast_precision_loss)]
        let n = self.history.len() as f64;
        Some(Point::new(sum.x / n, sum.y / n))
    }

    /// Number of points currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if no points are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop all retained points.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

/// Exponential moving average: `s = s + factor * (input - s)`.
///
/// The first input after construction or [`reset`](Self::reset) seeds
/// the value directly.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    factor: f64,
    value: Option<Point>,
}

impl ExponentialSmoother {
    /// Create a smoother with the given blend factor in `(0, 1]`.
    #[must_use]
    pub const fn new(factor: f64) -> Self {
        Self {
            factor,
            value: None,
        }
    }

    /// Blend `input` into the running value and return it.
    pub fn update(&mut self, input: Point) -> Point {
        let next = match self.value {
            Some(current) => current + (input - current) * self.factor,
            None => input,
        };
        self.value = Some(next);
        next
    }

    /// The current smoothed value, if seeded.
    #[must_use]
    pub const fn value(&self) -> Option<Point> {
        self.value
    }

    /// Forget the running value.
    pub const fn reset(&mut self) {
        self.value = None;
    }
}

/// Moving average feeding an exponential moving average.
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    average: MovingAverage,
    ema: ExponentialSmoother,
    last_raw: Option<Point>,
}

impl PositionSmoother {
    /// Create a smoother with a `window`-point moving average and an EMA
    /// of `factor`.
    #[must_use]
    pub fn new(window: usize, factor: f64) -> Self {
        Self {
            average: MovingAverage::new(window),
            ema: ExponentialSmoother::new(factor),
            last_raw: None,
        }
    }

    /// Create a smoother from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &InkConfig) -> Self {
        Self::new(config.smoothing_window, config.smoothing_factor)
    }

    /// Feed one raw canvas position and return the smoothed position.
    pub fn update(&mut self, raw: Point) -> Point {
        self.last_raw = Some(raw);
        let mean = self.average.push(raw);
        self.ema.update(mean)
    }

    /// The current smoothed position, or `None` after a reset.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        self.ema.value()
    }

    /// The most recent raw position fed to the smoother.
    #[must_use]
    pub const fn last_raw(&self) -> Option<Point> {
        self.last_raw
    }

    /// Clear both stages so the next update starts a fresh history.
    pub fn reset(&mut self) {
        self.average.reset();
        self.ema.reset();
        self.last_raw = None;
    }
}

impl Default for PositionSmoother {
    fn default() -> Self {
        Self::new(
            InkConfig::DEFAULT_SMOOTHING_WINDOW,
            InkConfig::DEFAULT_SMOOTHING_FACTOR,
        )
    }
}
