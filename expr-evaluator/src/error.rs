use crate::rpn_converter::ConverterError;
use crate::rpn_evaluator::EvaluatorError;
use crate::tokenizer::TokenizerError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Failed to tokenize the input: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Failed to convert the input to RPN: {0}")]
    Converter(#[from] ConverterError),
    #[error("Failed to evaluate the RPN expression: {0}")]
    Evaluator(#[from] EvaluatorError),
}

impl Error {
    /// Unbalanced parentheses or an operator/operand count mismatch.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::Converter(_)
                | Error::Evaluator(
                    EvaluatorError::NotEnoughOperands
                        | EvaluatorError::TooManyOperands
                        | EvaluatorError::UnexpectedParen
                )
        )
    }

    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::Tokenizer(TokenizerError::InvalidToken(_)))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
