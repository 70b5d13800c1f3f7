//! Secant and tangent slopes
//!
//! Both estimators return either a complete line description or the reason
//! it does not exist. Slopes are never rounded here, so the secant slope keeps
//! converging to the tangent slope as `h` shrinks.

use crate::error::{DegenerateInputError, DomainError, SlopeUnavailable};
use crate::symbolic::SymbolicFunction;

/// Line through `(a, f(a))` and `(a + h, f(a + h))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantSpec {
    pub a: f64,
    pub h: f64,
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub slope: f64,
}

impl SecantSpec {
    /// Height of the secant line at `x`
    pub fn line_at(&self, x: f64) -> f64 {
        self.y1 + self.slope * (x - self.x1)
    }

    pub fn midpoint(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Line through `(a, f(a))` with slope `f'(a)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSpec {
    pub a: f64,
    pub y: f64,
    pub slope: f64,
}

impl TangentSpec {
    /// Height of the tangent line at `x`
    pub fn line_at(&self, x: f64) -> f64 {
        self.y + self.slope * (x - self.a)
    }
}

/// Secant slope `(f(a+h) - f(a)) / h`
///
/// The divisor is the step actually taken, `x2 - x1`, which differs from `h`
/// once `a + h` rounds.
///
/// # Errors
/// - `Degenerate(ZeroStep)` when `h == 0` or `a + h` rounds back to `a`,
///   checked before any evaluation
/// - `Domain` naming the first endpoint where `f` has no value
pub fn secant(f: &SymbolicFunction, a: f64, h: f64) -> Result<SecantSpec, SlopeUnavailable> {
    let x1 = a;
    let x2 = a + h;
    let step = x2 - x1;
    if step == 0.0 {
        return Err(DegenerateInputError::ZeroStep.into());
    }

    let y1 = f
        .evaluate(x1)
        .into_result()
        .map_err(|error| SlopeUnavailable::Domain { x: x1, error })?;
    let y2 = f
        .evaluate(x2)
        .into_result()
        .map_err(|error| SlopeUnavailable::Domain { x: x2, error })?;

    let slope = (y2 - y1) / step;
    if !slope.is_finite() {
        return Err(SlopeUnavailable::Domain {
            x: x2,
            error: DomainError::NonFinite,
        });
    }

    Ok(SecantSpec {
        a,
        h,
        x1,
        x2,
        y1,
        y2,
        slope,
    })
}

/// Tangent slope `f'(a)` from the symbolic derivative
///
/// # Errors
/// - `Domain` when `f(a)` itself is undefined (the line has no anchor)
/// - `DerivativeDomain` when `f'(a)` is undefined
pub fn tangent(f: &SymbolicFunction, a: f64) -> Result<TangentSpec, SlopeUnavailable> {
    let y = f
        .evaluate(a)
        .into_result()
        .map_err(|error| SlopeUnavailable::Domain { x: a, error })?;
    let slope = f
        .evaluate_derivative(a)
        .into_result()
        .map_err(|error| SlopeUnavailable::DerivativeDomain { x: a, error })?;
    Ok(TangentSpec { a, y, slope })
}

/// One row of a convergence table
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceRow {
    pub h: f64,
    pub secant: Result<f64, SlopeUnavailable>,
    /// `|secant - tangent|` when both exist
    pub error: Option<f64>,
}

/// Secant slopes at `a` for each step in `steps`, compared to the tangent
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceTable {
    pub a: f64,
    pub tangent: Result<f64, SlopeUnavailable>,
    pub rows: Vec<ConvergenceRow>,
}

impl ConvergenceTable {
    /// True when every defined error is no larger than the previous one
    ///
    /// `tolerance` absorbs floating-point noise for functions whose secant is
    /// exact (linear functions).
    pub fn is_converging(&self, tolerance: f64) -> bool {
        let errors: Vec<f64> = self.rows.iter().filter_map(|r| r.error).collect();
        !errors.is_empty() && errors.windows(2).all(|w| w[1] <= w[0] + tolerance)
    }
}

/// Default step sequence: 0.1, 0.01, 0.001
pub const DEFAULT_STEPS: [f64; 3] = [0.1, 0.01, 0.001];

pub fn convergence(f: &SymbolicFunction, a: f64, steps: &[f64]) -> ConvergenceTable {
    let tangent_slope = tangent(f, a).map(|t| t.slope);
    let rows = steps
        .iter()
        .map(|&h| {
            let secant_slope = secant(f, a, h).map(|s| s.slope);
            let error = match (&secant_slope, &tangent_slope) {
                (Ok(s), Ok(t)) => Some((s - t).abs()),
                _ => None,
            };
            ConvergenceRow {
                h,
                secant: secant_slope,
                error,
            }
        })
        .collect();

    ConvergenceTable {
        a,
        tangent: tangent_slope,
        rows,
    }
}
