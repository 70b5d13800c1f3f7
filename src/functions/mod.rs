//! Centralized mathematical function registry
//!
//! This module provides a single source of truth for every function the
//! parser recognizes, including its domain-checked evaluation and its
//! derivative formula.

use crate::ast::Expr;
use std::sync::Arc;

pub(crate) mod definitions;
pub(crate) mod registry;

// ===== Helper functions for building derivative expressions =====

/// Create a function call expression from Arc<Expr> - cheap, avoids deep clone
pub(crate) fn call_arc(name: &str, arg: &Arc<Expr>) -> Expr {
    Expr::call_arc(name, Arc::clone(arg))
}

/// Multiply, optimizing for common cases (0 and 1)
pub(crate) fn mul_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        (Expr::Number(x), _) if *x == 0.0 => Expr::number(0.0),
        (_, Expr::Number(x)) if *x == 0.0 => Expr::number(0.0),
        (Expr::Number(x), _) if *x == 1.0 => b,
        (_, Expr::Number(x)) if *x == 1.0 => a,
        (Expr::Number(x), Expr::Number(y)) => Expr::number(x * y),
        _ => Expr::mul_expr(a, b),
    }
}

/// Negate an expression, folding constants and double negation
pub(crate) fn negate(e: Expr) -> Expr {
    match e {
        Expr::Number(n) => Expr::number(-n),
        Expr::Unary(crate::ast::UnaryOp::Neg, inner) => Arc::unwrap_or_clone(inner),
        other => Expr::neg(other),
    }
}
