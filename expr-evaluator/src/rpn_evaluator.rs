use crate::config::DivisionPolicy;
use crate::rpn_converter::RPNExpr;
use crate::stack::Stack;
use crate::tokenizer::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Not enough operands")]
    NotEnoughOperands,
    #[error("Too many operands")]
    TooManyOperands,
    #[error("Parenthesis in postfix expression")]
    UnexpectedParen,
    #[error("Division by zero")]
    DivisionByZero,
}

pub struct RpnEvaluator {
    division: DivisionPolicy,
}

impl Default for RpnEvaluator {
    fn default() -> Self {
        Self::new(DivisionPolicy::default())
    }
}

impl RpnEvaluator {
    pub fn new(division: DivisionPolicy) -> Self {
        Self { division }
    }

    /// Applies `op` as `a op b`, `a` being the left operand.
    fn apply(&self, op: Op, a: f64, b: f64) -> Result<f64, EvaluatorError> {
        let result = match op {
            Op::Plus => a + b,
            Op::Minus => a - b,
            Op::Mult => a * b,
            Op::Div => {
                if b == 0.0 && self.division == DivisionPolicy::Error {
                    return Err(EvaluatorError::DivisionByZero);
                }
                a / b
            }
            Op::Pow => a.powf(b),
        };

        Ok(result)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
    pub fn evaluate(&self, tokens: &RPNExpr) -> Result<f64, EvaluatorError> {
        use crate::tokenizer::Token::*;

        if tokens.is_empty() {
            return Err(EvaluatorError::EmptyExpression);
        }

        let mut eval_stack: Stack<f64> = Stack::new();

        for token in tokens.iter() {
            match *token {
                Number(num) => eval_stack.push(num),
                Operator(op) => {
                    let b = eval_stack.pop().ok_or(EvaluatorError::NotEnoughOperands)?;
                    let a = eval_stack.pop().ok_or(EvaluatorError::NotEnoughOperands)?;
                    let result = self.apply(op, a, b)?;
                    tracing::trace!(%op, a, b, result, "applied operator");
                    eval_stack.push(result);
                }
                LParen | RParen => return Err(EvaluatorError::UnexpectedParen),
            }
        }

        let result = eval_stack.pop().ok_or(EvaluatorError::NotEnoughOperands)?;
        if !eval_stack.is_empty() {
            tracing::debug!(left = eval_stack.len() + 1, "operands left after evaluation");
            return Err(EvaluatorError::TooManyOperands);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Op::*;
    use crate::tokenizer::Token::*;

    fn eval(tokens: Vec<crate::tokenizer::Token>) -> Result<f64, EvaluatorError> {
        RpnEvaluator::default().evaluate(&RPNExpr(tokens))
    }

    #[test]
    fn test_rpn_evaluator() {
        assert_eq!(eval(vec![Number(1.0), Number(2.0), Operator(Plus)]), Ok(3.0));
        assert_eq!(eval(vec![Number(1.0), Number(2.0), Operator(Minus)]), Ok(-1.0));
        assert_eq!(eval(vec![Number(2.0), Number(3.0), Operator(Mult)]), Ok(6.0));
        assert_eq!(eval(vec![Number(7.0), Number(2.0), Operator(Div)]), Ok(3.5));
        assert_eq!(eval(vec![Number(5.0), Number(2.0), Operator(Pow)]), Ok(25.0));
        assert_eq!(eval(vec![Number(4.0), Number(0.5), Operator(Pow)]), Ok(2.0));
    }

    #[test]
    fn test_rpn_evaluator_pow_left_to_right() {
        let tokens = vec![
            Number(2.0),
            Number(3.0),
            Operator(Pow),
            Number(2.0),
            Operator(Pow),
        ];
        assert_eq!(eval(tokens), Ok(64.0));
    }

    #[test]
    fn test_rpn_evaluator_division_by_zero() {
        assert_eq!(
            eval(vec![Number(1.0), Number(0.0), Operator(Div)]),
            Ok(f64::INFINITY)
        );
        assert!(eval(vec![Number(0.0), Number(0.0), Operator(Div)])
            .unwrap()
            .is_nan());

        let strict = RpnEvaluator::new(DivisionPolicy::Error);
        assert_eq!(
            strict.evaluate(&RPNExpr(vec![Number(1.0), Number(0.0), Operator(Div)])),
            Err(EvaluatorError::DivisionByZero)
        );
    }

    #[test]
    fn test_rpn_evaluator_malformed() {
        assert_eq!(eval(vec![]), Err(EvaluatorError::EmptyExpression));
        assert_eq!(
            eval(vec![Operator(Plus)]),
            Err(EvaluatorError::NotEnoughOperands)
        );
        assert_eq!(
            eval(vec![Number(1.0), Operator(Minus)]),
            Err(EvaluatorError::NotEnoughOperands)
        );
        assert_eq!(
            eval(vec![Number(1.0), Number(2.0)]),
            Err(EvaluatorError::TooManyOperands)
        );
        assert_eq!(
            eval(vec![LParen, Number(1.0)]),
            Err(EvaluatorError::UnexpectedParen)
        );
    }

    #[test]
    fn test_convert_to_rpn_and_eval() {
        let cases = [
            ("((123 * 6 + 123123) * (-1337 - -4)) * 5 / 120", -6879446.375),
            ("1 + 1 + 15 * 3 - 1 - -2", 48.0),
            ("(-2 ^ 3) * (3 ^ 2) - 1", -73.0),
            ("0.1 + 0.2 * 10", 2.1),
        ];

        for (input, expected) in cases {
            let mut tokenizer = crate::tokenizer::Tokenizer::new();
            let tokens = tokenizer.tokenize(input).unwrap();
            let rpn = crate::rpn_converter::RpnConverter::convert(&tokens).unwrap();
            let result = RpnEvaluator::default().evaluate(&rpn).unwrap();
            assert!(
                (result - expected).abs() < 1e-9,
                "{input} evaluated to {result}, expected {expected}"
            );
        }
    }
}
