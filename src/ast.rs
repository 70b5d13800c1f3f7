//! Abstract Syntax Tree for single-variable real expressions

use std::sync::Arc;

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Parsed expression tree
///
/// Children are shared through `Arc`, so derivative trees can reuse
/// sub-expressions of the original without deep copies.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant number (e.g., 2, 0.5, 1e-3)
    Number(f64),

    /// The free variable (e.g., "x")
    Variable(String),

    Unary(UnaryOp, Arc<Expr>),

    Binary(BinaryOp, Arc<Expr>, Arc<Expr>),

    /// Call of a registered single-argument function (e.g., "sin", "log")
    Call { name: String, arg: Arc<Expr> },
}

impl Expr {
    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// Create a variable expression
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Unary(UnaryOp::Neg, Arc::new(inner))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Arc::new(left), Arc::new(right))
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Add, left, right)
    }

    /// Create a subtraction expression
    pub fn sub_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Sub, left, right)
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Mul, left, right)
    }

    /// Create a division expression
    pub fn div_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Div, left, right)
    }

    /// Create a power expression
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::binary(BinaryOp::Pow, base, exponent)
    }

    /// Create a function call expression
    pub fn call(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Call {
            name: name.into(),
            arg: Arc::new(arg),
        }
    }

    /// Create a function call from an already shared argument - avoids a deep clone
    pub fn call_arc(name: impl Into<String>, arg: Arc<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            arg,
        }
    }

    // Accessor methods

    /// Check if expression is a constant number and return its value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(|n| n == 0.0)
    }

    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(|n| n == 1.0)
    }

    /// True when no variable occurs anywhere in the tree
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Number(_) => true,
            Expr::Variable(_) => false,
            Expr::Unary(_, inner) => inner.is_constant(),
            Expr::Binary(_, l, r) => l.is_constant() && r.is_constant(),
            Expr::Call { arg, .. } => arg.is_constant(),
        }
    }

    // Analysis methods

    /// Count the total number of nodes in the AST
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Unary(_, inner) => 1 + inner.node_count(),
            Expr::Binary(_, l, r) => 1 + l.node_count() + r.node_count(),
            Expr::Call { arg, .. } => 1 + arg.node_count(),
        }
    }

    /// Get the maximum nesting depth of the AST
    pub fn max_depth(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Unary(_, inner) => 1 + inner.max_depth(),
            Expr::Binary(_, l, r) => 1 + l.max_depth().max(r.max_depth()),
            Expr::Call { arg, .. } => 1 + arg.max_depth(),
        }
    }
}
