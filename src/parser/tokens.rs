//! Token types produced by the lexer

use crate::error::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    /// Variable or named constant
    Identifier(String),
    /// Name of a registered function
    Function(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
}

impl Token {
    /// Convert token to a user-friendly string for error messages
    pub(crate) fn to_user_string(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Identifier(name) | Token::Function(name) => name.clone(),
            Token::Operator(op) => op.symbol().to_string(),
            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

/// A token together with where it came from in the source text
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub span: Span,
}

impl Spanned {
    pub(crate) fn new(token: Token, span: Span) -> Self {
        Spanned { token, span }
    }
}
