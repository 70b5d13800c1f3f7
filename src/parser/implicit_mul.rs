//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` operators between tokens where multiplication is implied, e.g. `2x` → `2 * x`.

use super::tokens::{Operator, Spanned, Token};
use crate::error::Span;

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token, next: &Token) -> bool {
    match (current, next) {
        // Function followed by ( is a call, never a product
        (Token::Function(_), _) => false,

        // Number * Function: 4 sin(x) → 4 * sin(x)
        // Identifier * Function: x sin(x) → x * sin(x)
        // ) * Function: (a) sin(x) → (a) * sin(x)
        (Token::Number(_) | Token::Identifier(_) | Token::RightParen, Token::Function(_)) => true,

        // Coalesced arms for standard multiplication cases:
        // Number * Identifier: 2x
        // Number * (: 2(x)
        // Identifier * Identifier: pi x
        // Identifier * (: x(x + 1)
        // Identifier * Number: x2
        // ) * Identifier: )x
        // ) * Number: )2
        // ) * (: )(
        (Token::Number(_) | Token::Identifier(_) | Token::RightParen, Token::Identifier(_))
        | (Token::Number(_) | Token::Identifier(_) | Token::RightParen, Token::LeftParen)
        | (Token::Identifier(_) | Token::RightParen, Token::Number(_)) => true,

        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens
///
/// The inserted `*` carries an empty span positioned at the start of the
/// following token.
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Spanned>) -> Vec<Spanned> {
    // Optimization: Check if any insertion is needed before allocating new vector
    let needs_insertion = tokens
        .windows(2)
        .any(|w| should_insert_mul(&w[0].token, &w[1].token));

    if !needs_insertion {
        return tokens;
    }

    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let inserted_at = it
            .peek()
            .filter(|next| should_insert_mul(&current.token, &next.token))
            .map(|next| next.span.start);

        result.push(current);
        if let Some(at) = inserted_at {
            result.push(Spanned::new(Token::Operator(Operator::Mul), Span::new(at, at)));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanned(tokens: Vec<Token>) -> Vec<Spanned> {
        tokens
            .into_iter()
            .enumerate()
            .map(|(i, t)| Spanned::new(t, Span::at(i)))
            .collect()
    }

    fn plain(tokens: Vec<Spanned>) -> Vec<Token> {
        tokens.into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_number_identifier() {
        let result = plain(insert_implicit_multiplication(spanned(vec![
            Token::Number(2.0),
            Token::Identifier("x".into()),
        ])));
        assert_eq!(result.len(), 3);
        assert!(matches!(result[1], Token::Operator(Operator::Mul)));
    }

    #[test]
    fn test_paren_identifier() {
        let result = plain(insert_implicit_multiplication(spanned(vec![
            Token::RightParen,
            Token::Identifier("x".into()),
        ])));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_number_function() {
        let result = plain(insert_implicit_multiplication(spanned(vec![
            Token::Number(4.0),
            Token::Function("sin".into()),
            Token::LeftParen,
            Token::Identifier("x".into()),
            Token::RightParen,
        ])));
        assert_eq!(result.len(), 6);
        assert!(matches!(result[1], Token::Operator(Operator::Mul)));
    }

    #[test]
    fn test_function_no_multiplication() {
        let result = insert_implicit_multiplication(spanned(vec![
            Token::Function("sin".into()),
            Token::LeftParen,
        ]));
        assert_eq!(result.len(), 2); // No multiplication inserted
    }
}
