//! Lexer: source text to spanned tokens

use super::tokens::{Operator, Spanned, Token};
use crate::error::{ParseError, Span};
use crate::functions::registry::Registry;

/// Named constants that may appear in place of the variable
pub(crate) const CONSTANTS: [(&str, f64); 2] = [("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

pub(crate) fn lex(input: &str, variable: &str) -> Result<Vec<Spanned>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)) {
            let (value, end) = lex_number(input, pos)?;
            tokens.push(Spanned::new(Token::Number(value), Span::new(pos, end)));
            pos = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            let start = pos;
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            let name = &input[start..pos];
            let span = Span::new(start, pos);
            tokens.push(Spanned::new(classify_identifier(input, name, pos, variable, span)?, span));
            continue;
        }

        let (token, width) = match c {
            b'+' => (Token::Operator(Operator::Add), 1),
            b'-' => (Token::Operator(Operator::Sub), 1),
            // `**` is accepted as a spelling of `^`
            b'*' if bytes.get(pos + 1) == Some(&b'*') => (Token::Operator(Operator::Pow), 2),
            b'*' => (Token::Operator(Operator::Mul), 1),
            b'/' => (Token::Operator(Operator::Div), 1),
            b'^' => (Token::Operator(Operator::Pow), 1),
            b'(' => (Token::LeftParen, 1),
            b')' => (Token::RightParen, 1),
            b',' => (Token::Comma, 1),
            _ => {
                let ch = input[pos..].chars().next().unwrap_or('?');
                return Err(ParseError::InvalidToken {
                    token: ch.to_string(),
                    span: Some(Span::new(pos, pos + ch.len_utf8())),
                });
            }
        };
        tokens.push(Spanned::new(token, Span::new(pos, pos + width)));
        pos += width;
    }

    Ok(tokens)
}

fn lex_number(input: &str, start: usize) -> Result<(f64, usize), ParseError> {
    let bytes = input.as_bytes();
    let mut pos = start;
    let mut seen_dot = false;

    while pos < bytes.len() {
        match bytes[pos] {
            b'0'..=b'9' => pos += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                pos += 1;
            }
            _ => break,
        }
    }

    // Exponent only when digits follow, so `2e` stays `2 * e`
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut ahead = pos + 1;
        if ahead < bytes.len() && (bytes[ahead] == b'+' || bytes[ahead] == b'-') {
            ahead += 1;
        }
        if ahead < bytes.len() && bytes[ahead].is_ascii_digit() {
            pos = ahead;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let text = &input[start..pos];
    text.parse::<f64>()
        .map(|value| (value, pos))
        .map_err(|_| ParseError::InvalidNumber {
            value: text.to_string(),
            span: Some(Span::new(start, pos)),
        })
}

fn classify_identifier(
    input: &str,
    name: &str,
    end: usize,
    variable: &str,
    span: Span,
) -> Result<Token, ParseError> {
    if Registry::contains(name) {
        return Ok(Token::Function(name.to_string()));
    }
    if name == variable || CONSTANTS.iter().any(|(c, _)| *c == name) {
        return Ok(Token::Identifier(name.to_string()));
    }

    let followed_by_paren = input[end..].trim_start().starts_with('(');
    if followed_by_paren {
        Err(ParseError::UnknownFunction {
            name: name.to_string(),
            span: Some(span),
        })
    } else {
        Err(ParseError::UnknownSymbol {
            name: name.to_string(),
            variable: variable.to_string(),
            span: Some(span),
        })
    }
}
