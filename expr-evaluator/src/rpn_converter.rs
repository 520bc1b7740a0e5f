use std::fmt;
use std::str::FromStr;

use crate::stack::Stack;
use crate::tokenizer::{parse_token, Op, Token, TokenizedInput, TokenizerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConverterError {
    #[error("Mismatched closing parenthesis")]
    MismatchedClosingParen,
    #[error("Mismatched opening parenthesis")]
    MismatchedOpeningParen,
}

/// An expression in postfix order. Displays space-joined, e.g. `3 4 2 * +`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RPNExpr(pub Vec<Token>);

impl std::ops::Deref for RPNExpr {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for RPNExpr {
    type Err = TokenizerError;

    /// Reads an already space-separated postfix expression. Signed literals
    /// such as `-3` are accepted as numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()
            .map(RPNExpr)
    }
}

pub struct RpnConverter;

impl RpnConverter {
    /// Whether `top` must leave the operator stack before `incoming` is pushed.
    ///
    /// Equal precedence pops too, so every operator, `^` included, groups
    /// left to right.
    fn pops_before(top: &Token, incoming: Op) -> bool {
        match top {
            Token::Operator(op) => op.precedence() >= incoming.precedence(),
            _ => false,
        }
    }

    /// Converts infix notation to Reverse Polish Notation
    /// using the Shunting Yard algorithm.
    ///
    /// Only parenthesis balance is checked here. Operand counts are checked by
    /// the evaluator.
    #[tracing::instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
    pub fn convert(tokens: &TokenizedInput) -> Result<RPNExpr, ConverterError> {
        use crate::tokenizer::Token::*;
        let mut output = Vec::with_capacity(tokens.len());
        let mut stack: Stack<Token> = Stack::new();

        for &token in tokens.iter() {
            match token {
                Number(_) => output.push(token),
                Operator(op) => {
                    while stack
                        .peek()
                        .is_some_and(|top| RpnConverter::pops_before(top, op))
                    {
                        output.extend(stack.pop());
                    }

                    stack.push(token);
                }
                LParen => stack.push(token),
                RParen => {
                    let mut found = false;
                    while let Some(tok) = stack.pop() {
                        if tok == LParen {
                            found = true;
                            break;
                        }
                        output.push(tok);
                    }

                    if !found {
                        tracing::debug!("closing parenthesis without a matching opening one");
                        return Err(ConverterError::MismatchedClosingParen);
                    }
                }
            }
        }

        while let Some(tok) = stack.pop() {
            match tok {
                LParen => {
                    tracing::debug!("opening parenthesis left unclosed");
                    return Err(ConverterError::MismatchedOpeningParen);
                }
                _ => output.push(tok),
            }
        }

        let rpn = RPNExpr(output);
        tracing::trace!(%rpn, "converted to postfix");
        Ok(rpn)
    }
}
