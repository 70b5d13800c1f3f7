use super::lexer::CONSTANTS;
use super::tokens::{Operator, Spanned, Token};
use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;
use crate::functions::registry::FunctionDefinition;

/// Unary minus sits between Mul (20) and Pow (30) so `-x^2` parses as `-(x^2)`
const PREFIX_PRECEDENCE: u8 = 25;

/// Parse tokens into an AST using Pratt parsing algorithm
///
/// Nesting is bounded by `max_depth` while parsing, so adversarial input
/// fails with `MaxDepthExceeded` before the recursion can exhaust the stack.
pub(crate) fn parse_expression(tokens: &[Spanned], max_depth: usize) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let expr = parser.parse_expr(0)?;

    match parser.current() {
        None => Ok(expr),
        Some(trailing) => Err(ParseError::UnexpectedToken {
            expected: "end of input".to_string(),
            got: trailing.token.to_user_string(),
            span: Some(trailing.span),
        }),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Tree depth of the subexpression being built
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect_right_paren(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Some(Spanned {
                token: Token::RightParen,
                ..
            }) => {
                self.advance(); // consume )
                Ok(())
            }
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: ")".to_string(),
                got: other.token.to_user_string(),
                span: Some(other.span),
            }),
            None => Err(ParseError::unexpected(")", "end of input")),
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::MaxDepthExceeded);
        }
        Ok(())
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let entry_depth = self.depth;
        self.descend()?;

        // Parse left side (prefix)
        let mut left = self.parse_prefix()?;

        // Parse operators and right side (infix)
        while let Some(Spanned {
            token: Token::Operator(op),
            ..
        }) = self.current()
        {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            // each operator pushes `left` one level down, so `x+x+...+x` counts too
            self.descend()?;
            left = self.parse_infix(left, *op)?;
        }

        self.depth = entry_depth;
        Ok(left)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if let Some(Spanned {
            token: Token::RightParen,
            ..
        }) = self.current()
        {
            return Ok(args); // Empty argument list
        }

        loop {
            args.push(self.parse_expr(0)?);

            match self.current().map(|s| &s.token) {
                Some(Token::Comma) => self.advance(), // consume ,
                Some(Token::RightParen) => break,
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: ", or )".to_string(),
                        got: self
                            .current()
                            .map_or("end of input".to_string(), |s| s.token.to_user_string()),
                        span: self.current().map(|s| s.span),
                    });
                }
            }
        }

        Ok(args)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let spanned = self.current().ok_or(ParseError::UnexpectedEndOfInput)?;

        match &spanned.token {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::number(*n))
            }

            Token::Identifier(name) => {
                self.advance();
                match CONSTANTS.iter().find(|(c, _)| *c == name.as_str()) {
                    Some((_, value)) => Ok(Expr::number(*value)),
                    None => Ok(Expr::variable(name.clone())),
                }
            }

            Token::Function(name) => {
                self.advance();

                // Function must be followed by (
                match self.current() {
                    Some(Spanned {
                        token: Token::LeftParen,
                        ..
                    }) => self.advance(),
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "(".to_string(),
                            got: other.map_or("end of input".to_string(), |s| {
                                s.token.to_user_string()
                            }),
                            span: other.map(|s| s.span),
                        });
                    }
                }

                let mut args = self.parse_arguments()?;
                self.expect_right_paren()?;

                if args.len() != FunctionDefinition::ARITY {
                    return Err(ParseError::WrongArity {
                        name: name.clone(),
                        expected: FunctionDefinition::ARITY,
                        got: args.len(),
                    });
                }
                let arg = args.remove(0);
                Ok(Expr::call(name.clone(), arg))
            }

            Token::Operator(Operator::Sub) => {
                self.advance();
                let expr = self.parse_expr(PREFIX_PRECEDENCE)?;
                Ok(match expr {
                    Expr::Number(n) => Expr::number(-n),
                    other => Expr::neg(other),
                })
            }

            // Unary plus: same precedence as unary minus, just returns the expression
            Token::Operator(Operator::Add) => {
                self.advance();
                self.parse_expr(PREFIX_PRECEDENCE)
            }

            Token::LeftParen => {
                self.advance(); // consume (
                let expr = self.parse_expr(0)?;
                self.expect_right_paren()?;
                Ok(expr)
            }

            other => Err(ParseError::InvalidToken {
                token: other.to_user_string(),
                span: Some(spanned.span),
            }),
        }
    }

    fn parse_infix(&mut self, left: Expr, op: Operator) -> Result<Expr, ParseError> {
        self.advance();

        // Right associative for power, left for others
        let next_precedence = if op == Operator::Pow {
            op.precedence()
        } else {
            op.precedence() + 1
        };

        let right = self.parse_expr(next_precedence)?;

        let bin = match op {
            Operator::Add => BinaryOp::Add,
            Operator::Sub => BinaryOp::Sub,
            Operator::Mul => BinaryOp::Mul,
            Operator::Div => BinaryOp::Div,
            Operator::Pow => BinaryOp::Pow,
        };
        Ok(Expr::binary(bin, left, right))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_DEPTH;
    use crate::error::Span;

    fn parse(tokens: &[Spanned]) -> Result<Expr, ParseError> {
        parse_expression(tokens, DEFAULT_MAX_DEPTH)
    }

    fn tok(tokens: Vec<Token>) -> Vec<Spanned> {
        tokens
            .into_iter()
            .enumerate()
            .map(|(i, t)| Spanned::new(t, Span::at(i)))
            .collect()
    }

    #[test]
    fn test_parse_number() {
        let ast = parse(&tok(vec![Token::Number(314.0 / 100.0)])).unwrap();
        assert_eq!(ast, Expr::number(314.0 / 100.0));
    }

    #[test]
    fn test_parse_variable() {
        let ast = parse(&tok(vec![Token::Identifier("x".to_string())])).unwrap();
        assert_eq!(ast, Expr::variable("x"));
    }

    #[test]
    fn test_parse_constant() {
        let ast = parse(&tok(vec![Token::Identifier("pi".to_string())])).unwrap();
        assert_eq!(ast, Expr::number(std::f64::consts::PI));
    }

    #[test]
    fn test_precedence() {
        // x + 2 * 3 should be x + (2 * 3)
        let ast = parse(&tok(vec![
            Token::Identifier("x".to_string()),
            Token::Operator(Operator::Add),
            Token::Number(2.0),
            Token::Operator(Operator::Mul),
            Token::Number(3.0),
        ]))
        .unwrap();

        match ast {
            Expr::Binary(BinaryOp::Add, left, right) => {
                assert!(matches!(*left, Expr::Variable(_)));
                assert!(matches!(*right, Expr::Binary(BinaryOp::Mul, _, _)));
            }
            _ => panic!("Expected Add at top level"),
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        // x ^ 2 ^ 3 should be x ^ (2 ^ 3)
        let ast = parse(&tok(vec![
            Token::Identifier("x".to_string()),
            Token::Operator(Operator::Pow),
            Token::Number(2.0),
            Token::Operator(Operator::Pow),
            Token::Number(3.0),
        ]))
        .unwrap();

        match ast {
            Expr::Binary(BinaryOp::Pow, base, exponent) => {
                assert!(matches!(*base, Expr::Variable(_)));
                assert!(matches!(*exponent, Expr::Binary(BinaryOp::Pow, _, _)));
            }
            _ => panic!("Expected Pow at top level"),
        }
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        // -x^2 should be -(x^2)
        let ast = parse(&tok(vec![
            Token::Operator(Operator::Sub),
            Token::Identifier("x".to_string()),
            Token::Operator(Operator::Pow),
            Token::Number(2.0),
        ]))
        .unwrap();
        match ast {
            Expr::Unary(_, inner) => assert!(matches!(*inner, Expr::Binary(BinaryOp::Pow, _, _))),
            _ => panic!("Expected negation at top level"),
        }
    }

    #[test]
    fn test_parentheses() {
        // (x + 1) * 2
        let ast = parse(&tok(vec![
            Token::LeftParen,
            Token::Identifier("x".to_string()),
            Token::Operator(Operator::Add),
            Token::Number(1.0),
            Token::RightParen,
            Token::Operator(Operator::Mul),
            Token::Number(2.0),
        ]))
        .unwrap();

        match ast {
            Expr::Binary(BinaryOp::Mul, left, right) => {
                assert!(matches!(*left, Expr::Binary(BinaryOp::Add, _, _)));
                assert_eq!(*right, Expr::number(2.0));
            }
            _ => panic!("Expected Mul at top level"),
        }
    }

    #[test]
    fn test_empty_parentheses() {
        // () should be an error, NOT 1.0 or anything else
        let result = parse(&tok(vec![Token::LeftParen, Token::RightParen]));
        assert!(result.is_err(), "Empty parentheses should fail, got {:?}", result);
    }

    #[test]
    fn test_function_arity() {
        let result = parse(&tok(vec![
            Token::Function("sin".to_string()),
            Token::LeftParen,
            Token::Identifier("x".to_string()),
            Token::Comma,
            Token::Number(1.0),
            Token::RightParen,
        ]));
        assert!(matches!(result, Err(ParseError::WrongArity { got: 2, .. })));
    }

    #[test]
    fn test_trailing_token_rejected() {
        let result = parse(&tok(vec![
            Token::Identifier("x".to_string()),
            Token::RightParen,
        ]));
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_unclosed_paren() {
        let result = parse(&tok(vec![
            Token::LeftParen,
            Token::Identifier("x".to_string()),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_nesting_beyond_limit_is_rejected() {
        let depth = 100_000;
        let mut tokens = vec![Token::LeftParen; depth];
        tokens.push(Token::Identifier("x".to_string()));
        tokens.extend(std::iter::repeat_n(Token::RightParen, depth));
        assert_eq!(parse(&tok(tokens)), Err(ParseError::MaxDepthExceeded));

        let mut negations = vec![Token::Operator(Operator::Sub); depth];
        negations.push(Token::Identifier("x".to_string()));
        assert_eq!(parse(&tok(negations)), Err(ParseError::MaxDepthExceeded));
    }

    #[test]
    fn test_long_operator_chains_count_towards_depth() {
        // x ^ x ^ ... recurses through the right operand
        let mut tower = vec![Token::Identifier("x".to_string())];
        for _ in 0..200 {
            tower.push(Token::Operator(Operator::Pow));
            tower.push(Token::Identifier("x".to_string()));
        }
        assert_eq!(parse(&tok(tower)), Err(ParseError::MaxDepthExceeded));

        // x + x + ... builds a left-deep tree without recursing
        let mut sum = vec![Token::Identifier("x".to_string())];
        for _ in 0..200 {
            sum.push(Token::Operator(Operator::Add));
            sum.push(Token::Identifier("x".to_string()));
        }
        assert_eq!(parse(&tok(sum)), Err(ParseError::MaxDepthExceeded));

        let short: Vec<Token> = (0..5)
            .flat_map(|_| [Token::Identifier("x".to_string()), Token::Operator(Operator::Add)])
            .chain([Token::Number(1.0)])
            .collect();
        assert!(parse_expression(&tok(short), 8).is_ok());
    }
}
