//! Parser module - converts strings to AST
mod implicit_mul;
mod lexer;
mod pratt;
mod tokens;

use crate::ast::Expr;
use crate::error::ParseError;
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};

/// Safety limits applied to every parsed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Parse a formula string into an expression AST over a single variable
///
/// Pipeline: validate -> lex -> implicit_mul -> parse -> limits
///
/// # Errors
/// Returns `ParseError` if:
/// - The input is empty
/// - The input contains invalid syntax, unbalanced parentheses or trailing tokens
/// - An identifier other than `variable`, `pi` or `e` appears
/// - The tree exceeds `limits`
pub(crate) fn parse(input: &str, variable: &str, limits: ParseLimits) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyFormula);
    }

    let tokens = lexer::lex(input, variable)?;
    let tokens = implicit_mul::insert_implicit_multiplication(tokens);
    let expr = pratt::parse_expression(&tokens, limits.max_depth)?;

    if expr.max_depth() > limits.max_depth {
        return Err(ParseError::MaxDepthExceeded);
    }
    if expr.node_count() > limits.max_nodes {
        return Err(ParseError::MaxNodesExceeded);
    }

    Ok(expr)
}
