//! Error taxonomy for parsing, evaluation, slope estimation and configuration
//!
//! None of these errors is fatal to a render cycle: the orchestrator turns
//! them into omitted overlays, status notes or a placeholder frame.

use serde::Serialize;
use thiserror::Error;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

fn span_suffix(span: &Option<Span>) -> String {
    span.map_or(String::new(), |s| s.display())
}

/// Errors that can occur while turning function text into a `SymbolicFunction`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Formula cannot be empty")]
    EmptyFormula,

    #[error("Invalid number format: '{value}'{}", span_suffix(.span))]
    InvalidNumber { value: String, span: Option<Span> },

    #[error("Invalid token: '{token}'{}", span_suffix(.span))]
    InvalidToken { token: String, span: Option<Span> },

    #[error("Expected '{expected}', but got '{got}'{}", span_suffix(.span))]
    UnexpectedToken {
        expected: String,
        got: String,
        span: Option<Span>,
    },

    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Unknown symbol '{name}'{}: only '{variable}' may appear", span_suffix(.span))]
    UnknownSymbol {
        name: String,
        variable: String,
        span: Option<Span>,
    },

    #[error("Unknown function '{name}'{}", span_suffix(.span))]
    UnknownFunction { name: String, span: Option<Span> },

    #[error("Function '{name}' expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("'{text}' is not one of the supported functions")]
    NotWhitelisted { text: String },

    #[error("Expression exceeds maximum nesting depth")]
    MaxDepthExceeded,

    #[error("Expression exceeds maximum node count")]
    MaxNodesExceeded,
}

impl ParseError {
    /// Create UnexpectedToken without span
    pub fn unexpected(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            got: got.into(),
            span: None,
        }
    }
}

/// Reason an evaluation at a single point has no real value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DomainError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("logarithm of a non-positive number")]
    LogOfNonPositive,

    #[error("square root of a negative number")]
    NegativeSqrt,

    #[error("power has no real value")]
    InvalidPower,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("input is not a finite number")]
    NonFiniteInput,

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },
}

/// Inputs that make a slope meaningless regardless of the function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateInputError {
    #[error("slope unavailable at h=0")]
    ZeroStep,
}

/// Why a secant or tangent slope could not be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlopeUnavailable {
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),

    #[error("f(x) is undefined at x = {x}: {error}")]
    Domain { x: f64, error: DomainError },

    #[error("f'(x) is undefined at x = {x}: {error}")]
    DerivativeDomain { x: f64, error: DomainError },
}

/// Per-cycle parameters that cannot be plotted
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// Why a whole frame degrades to a placeholder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Rejected `VisualizerConfig` values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("plot domain [{min}, {max}] must be finite with min < max")]
    InvalidDomain { min: f64, max: f64 },

    #[error("{field} must be at least 2, got {value}")]
    TooFewSamples { field: &'static str, value: usize },

    #[error("{field} must be a finite non-negative number, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("fallback padding must be finite and positive, got {0}")]
    InvalidFallbackPadding(f64),

    #[error("slope precision {0} exceeds the supported maximum of 15 digits")]
    PrecisionTooHigh(usize),

    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
}
