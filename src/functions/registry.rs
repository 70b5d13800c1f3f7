use crate::ast::Expr;
use crate::error::DomainError;
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

/// Definition of a mathematical function including its evaluation and differentiation logic
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    /// Canonical name of the function (e.g., "sin", "log")
    pub name: &'static str,

    /// Numerical evaluation, rejecting arguments outside the real domain
    pub eval: fn(f64) -> Result<f64, DomainError>,

    /// Symbolic differentiation function
    /// Arguments: (argument of the call, derivative of the argument)
    /// Returns the chain-rule derivative f'(u) * u'
    pub derivative: fn(&Arc<Expr>, Expr) -> Expr,
}

impl FunctionDefinition {
    /// Every registered function takes exactly one argument
    pub(crate) const ARITY: usize = 1;
}

/// Static registry storing all function definitions
static REGISTRY: OnceLock<FxHashMap<&'static str, FunctionDefinition>> = OnceLock::new();

/// Initialize the registry with all function definitions
fn init_registry() -> FxHashMap<&'static str, FunctionDefinition> {
    crate::functions::definitions::all_definitions()
        .into_iter()
        .map(|def| (def.name, def))
        .collect()
}

/// Central registry for getting function definitions
pub(crate) struct Registry;

impl Registry {
    /// Get a function definition by name - O(1) HashMap lookup
    pub(crate) fn get(name: &str) -> Option<&'static FunctionDefinition> {
        REGISTRY.get_or_init(init_registry).get(name)
    }

    pub(crate) fn contains(name: &str) -> bool {
        Self::get(name).is_some()
    }
}
