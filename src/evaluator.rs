//! Numeric evaluation of expression trees
//!
//! Every boundary returns an explicit [`Evaluation`]: a finite value, or the
//! reason the point lies outside the function's real domain. NaN and the
//! infinities never escape as values.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::DomainError;
use crate::functions::registry::Registry;
use crate::symbolic::SymbolicFunction;
use serde::Serialize;

/// Result of evaluating a function at one point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Finite value
    Defined(f64),
    /// No real value at this point
    Undefined(DomainError),
}

impl Evaluation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Evaluation::Defined(v) => Some(*v),
            Evaluation::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Evaluation::Defined(_))
    }

    pub fn into_result(self) -> Result<f64, DomainError> {
        match self {
            Evaluation::Defined(v) => Ok(v),
            Evaluation::Undefined(err) => Err(err),
        }
    }
}

impl From<Result<f64, DomainError>> for Evaluation {
    fn from(result: Result<f64, DomainError>) -> Self {
        match result {
            Ok(v) => Evaluation::Defined(v),
            Err(err) => Evaluation::Undefined(err),
        }
    }
}

/// Reject non-finite intermediates
#[inline]
fn finite(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite)
    }
}

fn eval_pow(base: f64, exponent: f64) -> Result<f64, DomainError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    let integral = exponent.fract() == 0.0;
    if base < 0.0 && !integral {
        return Err(DomainError::InvalidPower);
    }
    // powi keeps small integer powers exact enough for secant convergence
    if integral && exponent.abs() <= f64::from(i32::MAX) {
        finite(base.powi(exponent as i32))
    } else {
        finite(base.powf(exponent))
    }
}

impl Expr {
    /// Evaluate with every variable bound to `x`
    ///
    /// The first domain violation met during the bottom-up walk is returned.
    pub(crate) fn eval_at(&self, x: f64) -> Result<f64, DomainError> {
        match self {
            Expr::Number(n) => finite(*n),
            Expr::Variable(_) => finite(x).map_err(|_| DomainError::NonFiniteInput),
            Expr::Unary(UnaryOp::Neg, inner) => Ok(-inner.eval_at(x)?),
            Expr::Call { name, arg } => {
                let def = Registry::get(name).ok_or_else(|| DomainError::UnknownFunction {
                    name: name.clone(),
                })?;
                finite((def.eval)(arg.eval_at(x)?)?)
            }
            Expr::Binary(op, l, r) => {
                let lhs = l.eval_at(x)?;
                let rhs = r.eval_at(x)?;
                match op {
                    BinaryOp::Add => finite(lhs + rhs),
                    BinaryOp::Sub => finite(lhs - rhs),
                    BinaryOp::Mul => finite(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(DomainError::DivisionByZero),
                    BinaryOp::Div => finite(lhs / rhs),
                    BinaryOp::Pow => eval_pow(lhs, rhs),
                }
            }
        }
    }
}

/// Evaluate `f` at a single point
pub fn evaluate(f: &SymbolicFunction, x: f64) -> Evaluation {
    f.expr().eval_at(x).into()
}

/// Evaluate `f` at every point of `xs`, preserving order
pub fn evaluate_many(f: &SymbolicFunction, xs: &[f64]) -> Vec<Evaluation> {
    xs.iter().map(|&x| evaluate(f, x)).collect()
}

/// Evaluate the derivative of `f` at a single point
pub fn evaluate_derivative(f: &SymbolicFunction, x: f64) -> Evaluation {
    f.derivative().eval_at(x).into()
}

/// Evaluate the derivative of `f` at every point of `xs`, preserving order
pub fn evaluate_derivative_many(f: &SymbolicFunction, xs: &[f64]) -> Vec<Evaluation> {
    xs.iter().map(|&x| evaluate_derivative(f, x)).collect()
}
