//! Parsed, differentiated whitelist functions

use crate::ast::Expr;
use crate::catalog::FunctionChoice;
use crate::error::ParseError;
use crate::evaluator::{self, Evaluation};
use crate::parser::{self, ParseLimits};

/// An immutable parsed function of `x` together with its derivative
///
/// Construction is a pure function of the source text: the same choice
/// always yields structurally equal `expr` and `derivative` trees.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicFunction {
    choice: FunctionChoice,
    expr: Expr,
    derivative: Expr,
}

impl SymbolicFunction {
    /// Name of the free variable in every whitelist entry
    pub const VARIABLE: &'static str = "x";

    /// Parse and differentiate a menu entry
    ///
    /// # Errors
    /// Never fails for the built-in menu under default limits; errors are
    /// still reported instead of panicking.
    pub fn from_choice(choice: FunctionChoice) -> Result<Self, ParseError> {
        Self::build(choice, ParseLimits::default())
    }

    pub(crate) fn build(choice: FunctionChoice, limits: ParseLimits) -> Result<Self, ParseError> {
        let expr = parser::parse(choice.source(), Self::VARIABLE, limits)?;
        let derivative = expr.derive(Self::VARIABLE)?;
        Ok(SymbolicFunction {
            choice,
            expr,
            derivative,
        })
    }

    /// Resolve text to a menu entry and build it
    ///
    /// Accepts the canonical source, the `**` spelling, the label, or any
    /// text that parses to the same tree as an entry (e.g. `2x + 1`).
    ///
    /// # Errors
    /// - the parser's error when the text is not a valid expression
    /// - `ParseError::NotWhitelisted` when it is valid but not on the menu
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::build(resolve_choice(text, ParseLimits::default())?, ParseLimits::default())
    }

    pub fn choice(&self) -> FunctionChoice {
        self.choice
    }

    pub fn source(&self) -> &'static str {
        self.choice.source()
    }

    pub fn label(&self) -> &'static str {
        self.choice.label()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn derivative(&self) -> &Expr {
        &self.derivative
    }

    pub fn evaluate(&self, x: f64) -> Evaluation {
        evaluator::evaluate(self, x)
    }

    pub fn evaluate_derivative(&self, x: f64) -> Evaluation {
        evaluator::evaluate_derivative(self, x)
    }
}

pub(crate) fn resolve_choice(text: &str, limits: ParseLimits) -> Result<FunctionChoice, ParseError> {
    if let Some(choice) = FunctionChoice::from_key(text) {
        return Ok(choice);
    }

    let parsed = parser::parse(text, SymbolicFunction::VARIABLE, limits)?;
    FunctionChoice::ALL
        .into_iter()
        .find(|choice| {
            parser::parse(choice.source(), SymbolicFunction::VARIABLE, limits)
                .is_ok_and(|expr| expr == parsed)
        })
        .ok_or_else(|| ParseError::NotWhitelisted {
            text: text.trim().to_string(),
        })
}
