//! Axis bounds that keep every active artifact visible
//!
//! Bounds are recomputed from scratch each cycle from whatever curves and
//! markers are active, so toggling an overlay changes the view reproducibly.

use crate::scene::{Marker, Polyline};
use serde::Serialize;

/// Padding rule applied independently to each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    /// Fraction of the observed span added on each side
    pub fraction: f64,
    /// Added on each side when the span is zero
    pub fallback: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            fraction: crate::config::DEFAULT_PADDING_FRACTION,
            fallback: crate::config::DEFAULT_FALLBACK_PADDING,
        }
    }
}

/// Closed interval accumulated from samples
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn empty() -> Self {
        Range {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Pad on both sides; a zero-width (or empty) range gets the fallback
    fn padded(self, padding: Padding) -> Range {
        let (min, max) = if self.is_empty() {
            (0.0, 0.0)
        } else {
            (self.min, self.max)
        };
        let span = max - min;
        let mut pad = if span > 0.0 {
            let pad = padding.fraction * span;
            if pad.is_finite() { pad } else { 0.0 }
        } else {
            padding.fallback
        };
        // far from the origin a small pad is lost to rounding
        if min - pad >= max + pad {
            pad = pad.max(min.abs().max(max.abs()) * f64::EPSILON * 4.0);
        }
        Range {
            min: (min - pad).max(f64::MIN),
            max: (max + pad).min(f64::MAX),
        }
    }
}

/// `(x_min, x_max, y_min, y_max)` with `x_min < x_max` and `y_min < y_max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Fit raw `(x, y)` samples; non-finite coordinates are ignored
    pub fn fit_points<I>(points: I, padding: Padding) -> Viewport
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut xs = Range::empty();
        let mut ys = Range::empty();
        for (x, y) in points {
            if x.is_finite() && y.is_finite() {
                xs.include(x);
                ys.include(y);
            }
        }
        let xs = xs.padded(padding);
        let ys = ys.padded(padding);
        Viewport {
            x_min: xs.min,
            x_max: xs.max,
            y_min: ys.min,
            y_max: ys.max,
        }
    }

    /// Fit the defined samples of `curves` plus every marker
    pub fn fit<'a, C>(curves: C, markers: &[Marker], padding: Padding) -> Viewport
    where
        C: IntoIterator<Item = &'a Polyline>,
    {
        let samples = curves.into_iter().flat_map(Polyline::defined_points);
        let marked = markers.iter().map(|m| (m.x, m.y));
        Self::fit_points(samples.chain(marked), padding)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
