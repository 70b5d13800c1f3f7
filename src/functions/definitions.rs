//! Function definitions for the registry
//!
//! `log` is the natural logarithm, matching the notation of the function
//! menu; `ln` is accepted as an alias.

use super::registry::FunctionDefinition;
use super::{call_arc, mul_opt, negate};
use crate::ast::Expr;
use crate::error::DomainError;
use std::sync::Arc;

fn eval_ln(x: f64) -> Result<f64, DomainError> {
    if x <= 0.0 {
        Err(DomainError::LogOfNonPositive)
    } else {
        Ok(x.ln())
    }
}

fn diff_ln(u: &Arc<Expr>, u_prime: Expr) -> Expr {
    // d/dx ln(u) = u' / u
    if u_prime.is_zero_num() {
        Expr::number(0.0)
    } else {
        Expr::div_expr(u_prime, (**u).clone())
    }
}

/// Return all function definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Trigonometric
        FunctionDefinition {
            name: "sin",
            eval: |x| Ok(x.sin()),
            derivative: |u, u_prime| {
                // d/dx sin(u) = cos(u) * u'
                mul_opt(call_arc("cos", u), u_prime)
            },
        },
        FunctionDefinition {
            name: "cos",
            eval: |x| Ok(x.cos()),
            derivative: |u, u_prime| {
                // d/dx cos(u) = -sin(u) * u'
                mul_opt(negate(call_arc("sin", u)), u_prime)
            },
        },
        FunctionDefinition {
            name: "tan",
            eval: |x| {
                if x.cos() == 0.0 {
                    Err(DomainError::DivisionByZero)
                } else {
                    Ok(x.tan())
                }
            },
            derivative: |u, u_prime| {
                // d/dx tan(u) = u' / cos^2(u)
                if u_prime.is_zero_num() {
                    return Expr::number(0.0);
                }
                Expr::div_expr(
                    u_prime,
                    Expr::pow(call_arc("cos", u), Expr::number(2.0)),
                )
            },
        },
        // Exponential / logarithmic
        FunctionDefinition {
            name: "exp",
            eval: |x| Ok(x.exp()),
            derivative: |u, u_prime| {
                // d/dx exp(u) = exp(u) * u'
                mul_opt(call_arc("exp", u), u_prime)
            },
        },
        FunctionDefinition {
            name: "log",
            eval: eval_ln,
            derivative: diff_ln,
        },
        FunctionDefinition {
            name: "ln",
            eval: eval_ln,
            derivative: diff_ln,
        },
        // Roots
        FunctionDefinition {
            name: "sqrt",
            eval: |x| {
                if x < 0.0 {
                    Err(DomainError::NegativeSqrt)
                } else {
                    Ok(x.sqrt())
                }
            },
            derivative: |u, u_prime| {
                // d/dx sqrt(u) = u' / (2 * sqrt(u))
                if u_prime.is_zero_num() {
                    return Expr::number(0.0);
                }
                Expr::div_expr(
                    u_prime,
                    Expr::mul_expr(Expr::number(2.0), call_arc("sqrt", u)),
                )
            },
        },
    ]
}
