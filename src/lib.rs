//! Secant and Tangent Line Visualizer
//!
//! Evaluation and scene-building core for an interactive "secant approaches
//! tangent" plot. A caller picks one of a fixed menu of functions, a base
//! point `a` and a step `h`; each cycle produces a renderer-agnostic
//! [`Scene`] (or a [`Placeholder`] when nothing can be drawn).
//!
//! # Features
//! - Real expression pipeline: lexer, implicit multiplication, Pratt parser
//! - Symbolic derivative for the tangent slope
//! - Explicit `Defined | Undefined(reason)` results, no NaN leaks
//! - Viewport fitted to whatever is currently drawn
//! - Serializable scenes for any plotting front end
//!
//! # Usage
//! ```
//! use secant_tangent::{FunctionChoice, Inputs, Visualizer};
//!
//! let mut vis = Visualizer::new();
//! let frame = vis.render(&Inputs::new(FunctionChoice::Square, 1.0, 0.5).with_tangent(true));
//! let scene = frame.scene().unwrap();
//! assert_eq!(scene.annotations[0].text, "Slope = 2.500000");
//! assert!(scene.tangent.is_some());
//! ```

mod ast;
mod catalog;
mod config;
mod differentiation;
mod display;
mod error;
pub mod estimator;
mod evaluator;
mod functions;
mod orchestrator;
mod parser;
pub mod scene;
mod symbolic;
mod viewport;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use catalog::{Family, FunctionChoice};
pub use config::{
    DEFAULT_DOMAIN, DEFAULT_FALLBACK_PADDING, DEFAULT_OVERLAY_EXTENSION, DEFAULT_OVERLAY_SAMPLES,
    DEFAULT_PADDING_FRACTION, DEFAULT_SAMPLES, SLOPE_PRECISION, VisualizerConfig,
};
pub use error::{
    ConfigError, DegenerateInputError, DomainError, InputError, ParseError, RenderError,
    SlopeUnavailable, Span,
};
pub use estimator::{ConvergenceTable, SecantSpec, TangentSpec, convergence, secant, tangent};
pub use evaluator::{
    Evaluation, evaluate, evaluate_derivative, evaluate_derivative_many, evaluate_many,
};
pub use orchestrator::{Inputs, PLACEHOLDER_TITLE, Visualizer, compose, linspace};
pub use scene::{Frame, Placeholder, Scene};
pub use symbolic::SymbolicFunction;
pub use viewport::{Padding, Viewport};

/// Default maximum AST depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum AST node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Render one frame with the default configuration
///
/// Convenience wrapper over a throwaway [`Visualizer`]; long-lived callers
/// should keep a session so parsed functions are reused.
pub fn render(inputs: &Inputs) -> Frame {
    Visualizer::new().render(inputs)
}
