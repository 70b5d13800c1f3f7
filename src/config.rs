//! Render configuration
//!
//! Builder in the style of `VisualizerConfig::new().with_samples(500)`; every
//! setter is infallible and [`VisualizerConfig::validate`] checks the result
//! as a whole.

use crate::error::ConfigError;
use crate::parser::ParseLimits;
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};

/// Default x-range of the base curve
pub const DEFAULT_DOMAIN: (f64, f64) = (-5.0, 5.0);
/// Default number of base-curve samples
pub const DEFAULT_SAMPLES: usize = 1000;
/// Default number of samples per secant/tangent overlay
pub const DEFAULT_OVERLAY_SAMPLES: usize = 100;
/// How far overlays extend beyond `[a, a+h]` on each side
pub const DEFAULT_OVERLAY_EXTENSION: f64 = 1.0;
/// Viewport padding as a fraction of each axis span
pub const DEFAULT_PADDING_FRACTION: f64 = 0.05;
/// Viewport padding used when an axis span is zero
pub const DEFAULT_FALLBACK_PADDING: f64 = 1.0;
/// Decimal digits used for every displayed slope
pub const SLOPE_PRECISION: usize = 6;

const MAX_SLOPE_PRECISION: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    domain: (f64, f64),
    samples: usize,
    overlay_samples: usize,
    overlay_extension: f64,
    padding_fraction: f64,
    fallback_padding: f64,
    slope_precision: usize,
    max_depth: usize,
    max_nodes: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            domain: DEFAULT_DOMAIN,
            samples: DEFAULT_SAMPLES,
            overlay_samples: DEFAULT_OVERLAY_SAMPLES,
            overlay_extension: DEFAULT_OVERLAY_EXTENSION,
            padding_fraction: DEFAULT_PADDING_FRACTION,
            fallback_padding: DEFAULT_FALLBACK_PADDING,
            slope_precision: SLOPE_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl VisualizerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// x-range sampled for the base curve
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_overlay_samples(mut self, samples: usize) -> Self {
        self.overlay_samples = samples;
        self
    }

    pub fn with_overlay_extension(mut self, extension: f64) -> Self {
        self.overlay_extension = extension;
        self
    }

    pub fn with_padding_fraction(mut self, fraction: f64) -> Self {
        self.padding_fraction = fraction;
        self
    }

    pub fn with_fallback_padding(mut self, padding: f64) -> Self {
        self.fallback_padding = padding;
        self
    }

    pub fn with_slope_precision(mut self, digits: usize) -> Self {
        self.slope_precision = digits;
        self
    }

    /// Maximum AST depth accepted by the parser
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Maximum AST node count accepted by the parser
    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Check every field, returning the configuration unchanged on success
    ///
    /// # Errors
    /// The first offending field as a `ConfigError`.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let (min, max) = self.domain;
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(ConfigError::InvalidDomain { min, max });
        }
        if self.samples < 2 {
            return Err(ConfigError::TooFewSamples {
                field: "samples",
                value: self.samples,
            });
        }
        if self.overlay_samples < 2 {
            return Err(ConfigError::TooFewSamples {
                field: "overlay_samples",
                value: self.overlay_samples,
            });
        }
        for (field, value) in [
            ("overlay_extension", self.overlay_extension),
            ("padding_fraction", self.padding_fraction),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        if !(self.fallback_padding.is_finite() && self.fallback_padding > 0.0) {
            return Err(ConfigError::InvalidFallbackPadding(self.fallback_padding));
        }
        if self.slope_precision > MAX_SLOPE_PRECISION {
            return Err(ConfigError::PrecisionTooHigh(self.slope_precision));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_depth" });
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_nodes" });
        }
        Ok(self)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn overlay_samples(&self) -> usize {
        self.overlay_samples
    }

    pub fn overlay_extension(&self) -> f64 {
        self.overlay_extension
    }

    pub fn padding_fraction(&self) -> f64 {
        self.padding_fraction
    }

    pub fn fallback_padding(&self) -> f64 {
        self.fallback_padding
    }

    pub fn slope_precision(&self) -> usize {
        self.slope_precision
    }

    pub(crate) fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}
