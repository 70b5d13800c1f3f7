// Display formatting for AST
use crate::ast::{BinaryOp, Expr, UnaryOp};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => format_number(f, *n),

            Expr::Variable(name) => write!(f, "{}", name),

            Expr::Unary(UnaryOp::Neg, inner) => write!(f, "-{}", format_mul_operand(inner)),

            Expr::Call { name, arg } => write!(f, "{}({})", name, arg),

            Expr::Binary(BinaryOp::Add, u, v) => write!(f, "{} + {}", u, v),

            Expr::Binary(BinaryOp::Sub, u, v) => {
                // Parenthesize RHS when it's an addition or subtraction to preserve
                // the intended grouping: `a - (b + c)` instead of `a - b + c`.
                let right_str = match &**v {
                    Expr::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => format!("({})", v),
                    _ => format!("{}", v),
                };
                write!(f, "{} - {}", u, right_str)
            }

            Expr::Binary(BinaryOp::Mul, u, v) => {
                write!(f, "{}*{}", format_mul_operand(u), format_mul_operand(v))
            }

            Expr::Binary(BinaryOp::Div, u, v) => {
                // Add parentheses around numerator if it's addition or subtraction
                let formatted_num = match &**u {
                    Expr::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => format!("({})", u),
                    _ => format!("{}", u),
                };
                // Denominator stays bare only for atoms, powers and calls
                let formatted_denom = match &**v {
                    Expr::Variable(_)
                    | Expr::Call { .. }
                    | Expr::Binary(BinaryOp::Pow, _, _) => format!("{}", v),
                    Expr::Number(n) if *n >= 0.0 => format!("{}", v),
                    _ => format!("({})", v),
                };
                write!(f, "{} / {}", formatted_num, formatted_denom)
            }

            Expr::Binary(BinaryOp::Pow, u, v) => {
                // (C * R)^2 must not display as "C * R^2"
                let formatted_base = match &**u {
                    Expr::Binary(..) | Expr::Unary(..) => format!("({})", u),
                    Expr::Number(n) if *n < 0.0 => format!("({})", u),
                    _ => format!("{}", u),
                };
                let formatted_exp = match &**v {
                    Expr::Variable(_) => format!("{}", v),
                    Expr::Number(n) if *n >= 0.0 => format!("{}", v),
                    _ => format!("({})", v),
                };
                write!(f, "{}^{}", formatted_base, formatted_exp)
            }
        }
    }
}

fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            write!(f, "Infinity")
        } else {
            write!(f, "-Infinity")
        }
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        // Display as integer if no fractional part
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

/// Operands of `*` and unary minus need parentheses when they are sums
fn format_mul_operand(expr: &Expr) -> String {
    match expr {
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => format!("({})", expr),
        Expr::Binary(BinaryOp::Div, _, _) => format!("({})", expr),
        Expr::Number(n) if *n < 0.0 => format!("({})", expr),
        _ => format!("{}", expr),
    }
}
