//! One render cycle: evaluate, estimate, fit, describe
//!
//! [`compose`] is a pure function of its arguments. [`Visualizer`] adds the
//! only cross-cycle state, a memo of parsed menu functions, and turns
//! whole-frame failures into a placeholder instead of an error.

use crate::catalog::FunctionChoice;
use crate::config::VisualizerConfig;
use crate::error::{ConfigError, DomainError, InputError, ParseError, RenderError};
use crate::estimator::{self, SecantSpec, TangentSpec};
use crate::evaluator::Evaluation;
use crate::scene::{
    Annotation, AnnotationKind, CurvePoint, CurveRole, Frame, Marker, Placeholder, Polyline, Scene,
};
use crate::symbolic::{self, SymbolicFunction};
use crate::viewport::{Padding, Viewport};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Title of the placeholder frame
pub const PLACEHOLDER_TITLE: &str = "Error in Function";

/// Parameters of a single interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub choice: FunctionChoice,
    pub a: f64,
    pub h: f64,
    #[serde(default)]
    pub show_tangent: bool,
}

impl Default for Inputs {
    fn default() -> Self {
        Inputs {
            choice: FunctionChoice::Square,
            a: 1.0,
            h: 0.5,
            show_tangent: false,
        }
    }
}

impl Inputs {
    pub fn new(choice: FunctionChoice, a: f64, h: f64) -> Self {
        Inputs {
            choice,
            a,
            h,
            show_tangent: false,
        }
    }

    pub fn with_tangent(mut self, show: bool) -> Self {
        self.show_tangent = show;
        self
    }

    fn check(&self) -> Result<(), InputError> {
        for (name, value) in [("a", self.a), ("h", self.h)] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { name, value });
            }
        }
        let x2 = self.a + self.h;
        if !x2.is_finite() {
            return Err(InputError::NonFinite {
                name: "a + h",
                value: x2,
            });
        }
        Ok(())
    }
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Float formatting that keeps a trailing `.0` on whole numbers
fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn format_slope(slope: f64, precision: usize) -> String {
    format!("{slope:.precision$}")
}

fn line_point(x: f64, y: f64) -> CurvePoint {
    let y = if y.is_finite() {
        Evaluation::Defined(y)
    } else {
        Evaluation::Undefined(DomainError::NonFinite)
    };
    CurvePoint { x, y }
}

/// Span shared by both overlays: `[min(a, a+h) - ext, max(a, a+h) + ext]`
fn overlay_span(a: f64, h: f64, config: &VisualizerConfig) -> (f64, f64) {
    let (x1, x2) = (a, a + h);
    let ext = config.overlay_extension();
    (x1.min(x2) - ext, x1.max(x2) + ext)
}

fn secant_polyline(secant: &SecantSpec, config: &VisualizerConfig) -> Polyline {
    let (start, end) = overlay_span(secant.a, secant.h, config);
    Polyline {
        role: CurveRole::Secant,
        label: format!(
            "Secant line (slope = {})",
            format_slope(secant.slope, config.slope_precision())
        ),
        points: linspace(start, end, config.overlay_samples())
            .into_iter()
            .map(|x| line_point(x, secant.line_at(x)))
            .collect(),
    }
}

fn tangent_polyline(tangent: &TangentSpec, h: f64, config: &VisualizerConfig) -> Polyline {
    let (start, end) = overlay_span(tangent.a, h, config);
    Polyline {
        role: CurveRole::Tangent,
        label: format!(
            "Tangent line (slope = {})",
            format_slope(tangent.slope, config.slope_precision())
        ),
        points: linspace(start, end, config.overlay_samples())
            .into_iter()
            .map(|x| line_point(x, tangent.line_at(x)))
            .collect(),
    }
}

fn marker(x: f64, y: f64) -> Marker {
    Marker {
        x,
        y,
        label: format!("({x:.2}, {y:.4})"),
    }
}

/// Build the scene for `function` under `inputs`
///
/// Missing overlays are recorded in `Scene::notes`; this never fails.
pub fn compose(function: &SymbolicFunction, inputs: &Inputs, config: &VisualizerConfig) -> Scene {
    let Inputs { a, h, .. } = *inputs;
    let precision = config.slope_precision();

    let (min, max) = config.domain();
    let base = Polyline {
        role: CurveRole::Function,
        label: format!("f(x) = {}", function.label()),
        points: linspace(min, max, config.samples())
            .into_iter()
            .map(|x| CurvePoint {
                x,
                y: function.evaluate(x),
            })
            .collect(),
    };

    let mut markers = Vec::with_capacity(2);
    let x1 = a;
    let x2 = a + h;
    if let Some(y1) = function.evaluate(x1).value() {
        markers.push(marker(x1, y1));
    }
    if x2 != x1
        && let Some(y2) = function.evaluate(x2).value()
    {
        markers.push(marker(x2, y2));
    }

    let mut annotations = Vec::new();
    let mut notes = Vec::new();

    let secant = estimator::secant(function, a, h);
    let secant_line = match &secant {
        Ok(spec) => {
            let (mid_x, mid_y) = spec.midpoint();
            annotations.push(Annotation {
                kind: AnnotationKind::SecantSlope,
                x: mid_x,
                y: mid_y,
                text: format!("Slope = {}", format_slope(spec.slope, precision)),
            });
            Some(secant_polyline(spec, config))
        }
        Err(err) => {
            debug!(choice = %inputs.choice, a, h, reason = %err, "secant overlay omitted");
            notes.push(err.to_string());
            None
        }
    };

    let tangent = inputs.show_tangent.then(|| estimator::tangent(function, a));
    let tangent_line = match &tangent {
        Some(Ok(spec)) => {
            annotations.push(Annotation {
                kind: AnnotationKind::TangentSlope,
                x: spec.a,
                y: spec.y,
                text: format!("Tangent slope = {}", format_slope(spec.slope, precision)),
            });
            Some(tangent_polyline(spec, h, config))
        }
        Some(Err(err)) => {
            debug!(choice = %inputs.choice, a, reason = %err, "tangent overlay omitted");
            notes.push(format!("tangent line unavailable: {err}"));
            None
        }
        None => None,
    };

    let mut readout = vec![
        format!("Function: f(x) = {}", function.label()),
        format!("Point a: {}", format_plain(a)),
        format!("Value h: {}", format_plain(h)),
        format!("Secant from: x = {} to x = {x2:.3}", format_plain(a)),
    ];
    match &secant {
        Ok(spec) => {
            let slope = format_slope(spec.slope, precision);
            readout.push(format!("Current slope: {slope}"));
            readout.push("As h → 0, the secant line approaches the tangent line.".to_string());
            readout.push(format!(
                "This slope approximates f'({}) = {slope}",
                format_plain(a)
            ));
        }
        Err(_) => readout.push("Current slope: Unable to calculate".to_string()),
    }
    readout.push(format!("f'(x) = {}", function.derivative()));
    if let Some(Ok(spec)) = &tangent {
        readout.push(format!(
            "Tangent slope: f'({}) = {}",
            format_plain(a),
            format_slope(spec.slope, precision)
        ));
    }

    let padding = Padding {
        fraction: config.padding_fraction(),
        fallback: config.fallback_padding(),
    };
    let curves = std::iter::once(&base)
        .chain(secant_line.iter())
        .chain(tangent_line.iter());
    let viewport = Viewport::fit(curves, &markers, padding);

    Scene {
        title: format!(
            "Function with Secant Line from x={} to x={x2:.3}",
            format_plain(a)
        ),
        function: base,
        secant: secant_line,
        tangent: tangent_line,
        markers,
        annotations,
        readout,
        notes,
        viewport,
    }
}

/// Render session owning the configuration and the parser memo
#[derive(Debug, Default)]
pub struct Visualizer {
    config: VisualizerConfig,
    cache: FxHashMap<FunctionChoice, Arc<SymbolicFunction>>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// `ConfigError` when the configuration fails validation.
    pub fn with_config(config: VisualizerConfig) -> Result<Self, ConfigError> {
        Ok(Visualizer {
            config: config.validate()?,
            cache: FxHashMap::default(),
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Number of menu entries parsed so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Parsed function for `choice`, parsing it on first use
    ///
    /// # Errors
    /// `ParseError` if the entry cannot be parsed under the configured limits.
    pub fn function(&mut self, choice: FunctionChoice) -> Result<Arc<SymbolicFunction>, ParseError> {
        if let Some(function) = self.cache.get(&choice) {
            trace!(%choice, "parser memo hit");
            return Ok(Arc::clone(function));
        }
        trace!(%choice, "parser memo miss");
        let function = Arc::new(SymbolicFunction::build(choice, self.config.parse_limits())?);
        self.cache.insert(choice, Arc::clone(&function));
        Ok(function)
    }

    /// Scene for `inputs`, or the reason none can be drawn
    ///
    /// # Errors
    /// - `RenderError::Input` for a non-finite `a` or `h`
    /// - `RenderError::Parse` if the function cannot be built
    pub fn try_render(&mut self, inputs: &Inputs) -> Result<Scene, RenderError> {
        inputs.check()?;
        let function = self.function(inputs.choice)?;
        Ok(compose(&function, inputs, &self.config))
    }

    /// Run one render cycle
    pub fn render(&mut self, inputs: &Inputs) -> Frame {
        debug!(
            choice = %inputs.choice,
            a = inputs.a,
            h = inputs.h,
            show_tangent = inputs.show_tangent,
            "render cycle"
        );
        match self.try_render(inputs) {
            Ok(scene) => Frame::Plot(scene),
            Err(err) => placeholder(&err),
        }
    }

    /// Render cycle for free-form function text
    ///
    /// Text that does not resolve to a menu entry yields a placeholder.
    pub fn render_source(&mut self, text: &str, a: f64, h: f64, show_tangent: bool) -> Frame {
        match symbolic::resolve_choice(text, self.config.parse_limits()) {
            Ok(choice) => self.render(&Inputs::new(choice, a, h).with_tangent(show_tangent)),
            Err(err) => placeholder(&err.into()),
        }
    }
}

fn placeholder(err: &RenderError) -> Frame {
    warn!(error = %err, "frame degraded to placeholder");
    Frame::Unavailable(Placeholder {
        title: PLACEHOLDER_TITLE.to_string(),
        message: format!("Error plotting function:\n{err}"),
    })
}
