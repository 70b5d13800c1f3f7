// Differentiation engine - applies calculus rules node by node
//
// Inline shortcuts (0 + u → u, 1 * u → u, constant folding of numeric
// factors) keep derivative trees small enough to display in annotations
// without a separate simplification pass.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::functions::registry::Registry;
use crate::functions::{mul_opt, negate};
use std::sync::Arc;

fn add_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        _ if a.is_zero_num() => b,
        _ if b.is_zero_num() => a,
        (Expr::Number(x), Expr::Number(y)) => Expr::number(x + y),
        _ => Expr::add_expr(a, b),
    }
}

fn sub_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        _ if b.is_zero_num() => a,
        _ if a.is_zero_num() => negate(b),
        (Expr::Number(x), Expr::Number(y)) => Expr::number(x - y),
        _ => Expr::sub_expr(a, b),
    }
}

impl Expr {
    /// Differentiate this expression with respect to `var`
    ///
    /// # Errors
    /// `ParseError::UnknownFunction` if a call names a function missing from
    /// the registry. Trees built by the parser never contain one.
    pub(crate) fn derive(&self, var: &str) -> Result<Expr, ParseError> {
        Ok(match self {
            // Base cases
            Expr::Number(_) => Expr::number(0.0),

            Expr::Variable(name) => {
                if name == var {
                    Expr::number(1.0)
                } else {
                    Expr::number(0.0)
                }
            }

            Expr::Unary(UnaryOp::Neg, u) => negate(u.derive(var)?),

            // Chain rule through the registry: f(u)' = f'(u) * u'
            Expr::Call { name, arg } => {
                let def = Registry::get(name).ok_or_else(|| ParseError::UnknownFunction {
                    name: name.clone(),
                    span: None,
                })?;
                let arg_prime = arg.derive(var)?;
                if arg_prime.is_zero_num() {
                    Expr::number(0.0)
                } else {
                    (def.derivative)(arg, arg_prime)
                }
            }

            // Sum rule: (u + v)' = u' + v'
            Expr::Binary(BinaryOp::Add, u, v) => add_opt(u.derive(var)?, v.derive(var)?),

            // Subtraction rule: (u - v)' = u' - v'
            Expr::Binary(BinaryOp::Sub, u, v) => sub_opt(u.derive(var)?, v.derive(var)?),

            // Product rule: (u * v)' = u' * v + u * v'
            Expr::Binary(BinaryOp::Mul, u, v) => {
                let u_prime = u.derive(var)?;
                let v_prime = v.derive(var)?;

                let term1 = mul_opt(u_prime, (**v).clone());
                let term2 = mul_opt((**u).clone(), v_prime);
                add_opt(term1, term2)
            }

            // Quotient rule: (u / v)' = (u' * v - u * v') / v^2
            Expr::Binary(BinaryOp::Div, u, v) => {
                let u_prime = u.derive(var)?;
                let v_prime = v.derive(var)?;

                if v_prime.is_zero_num() {
                    // Constant denominator: u' / v
                    if u_prime.is_zero_num() {
                        Expr::number(0.0)
                    } else if v.is_one_num() {
                        u_prime
                    } else {
                        Expr::div_expr(u_prime, (**v).clone())
                    }
                } else {
                    let numerator = sub_opt(
                        mul_opt(u_prime, (**v).clone()),
                        mul_opt((**u).clone(), v_prime),
                    );
                    if numerator.is_zero_num() {
                        Expr::number(0.0)
                    } else {
                        Expr::div_expr(numerator, Expr::pow((**v).clone(), Expr::number(2.0)))
                    }
                }
            }

            Expr::Binary(BinaryOp::Pow, u, v) => derive_pow(u, v, var)?,
        })
    }
}

/// Power rule for constant exponents, logarithmic differentiation otherwise
fn derive_pow(u: &Arc<Expr>, v: &Arc<Expr>, var: &str) -> Result<Expr, ParseError> {
    let u_prime = u.derive(var)?;

    if v.is_constant() {
        // (u^n)' = n * u^(n-1) * u'
        if u_prime.is_zero_num() {
            return Ok(Expr::number(0.0));
        }
        let power = match v.as_number() {
            Some(n) if n == 0.0 => return Ok(Expr::number(0.0)),
            Some(n) if n == 1.0 => return Ok(u_prime),
            Some(n) if n == 2.0 => mul_opt(Expr::number(2.0), (**u).clone()),
            Some(n) => mul_opt(
                Expr::number(n),
                Expr::pow((**u).clone(), Expr::number(n - 1.0)),
            ),
            // Non-numeric constant exponent such as 1/2
            None => Expr::mul_expr(
                (**v).clone(),
                Expr::pow((**u).clone(), sub_opt((**v).clone(), Expr::number(1.0))),
            ),
        };
        return Ok(mul_opt(power, u_prime));
    }

    // Variable exponent: d/dx[u^v] = u^v * (v' * ln(u) + v * u'/u)
    let v_prime = v.derive(var)?;
    let ln_u = if u.is_constant() && u.as_number() == Some(std::f64::consts::E) {
        Expr::number(1.0)
    } else {
        Expr::call_arc("ln", Arc::clone(u))
    };
    let term1 = mul_opt(v_prime, ln_u);
    let term2 = if u_prime.is_zero_num() {
        Expr::number(0.0)
    } else {
        mul_opt((**v).clone(), Expr::div_expr(u_prime, (**u).clone()))
    };
    Ok(mul_opt(
        Expr::Binary(BinaryOp::Pow, Arc::clone(u), Arc::clone(v)),
        add_opt(term1, term2),
    ))
}
