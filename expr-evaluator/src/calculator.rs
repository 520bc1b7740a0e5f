use crate::config::Config;
use crate::error::Result;
use crate::rpn_converter::{RPNExpr, RpnConverter};
use crate::rpn_evaluator::RpnEvaluator;
use crate::tokenizer::{TokenizedInput, Tokenizer};

/// Runs the tokenize, convert and evaluate pipeline under one [`Config`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    config: Config,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokenize(&self, expression: &str) -> Result<TokenizedInput> {
        Ok(Tokenizer::with_config(&self.config).tokenize(expression)?)
    }

    pub fn convert(&self, expression: &str) -> Result<RPNExpr> {
        let tokens = self.tokenize(expression)?;
        Ok(RpnConverter::convert(&tokens)?)
    }

    /// Space-joined postfix form of `expression`; empty input gives `""`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn to_postfix(&self, expression: &str) -> Result<String> {
        Ok(self.convert(expression)?.to_string())
    }

    /// Evaluates an infix expression. Empty input is
    /// [`EvaluatorError::EmptyExpression`](crate::rpn_evaluator::EvaluatorError::EmptyExpression).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, expression: &str) -> Result<f64> {
        let rpn = self.convert(expression)?;
        self.evaluate_rpn(&rpn)
    }

    /// Evaluates an already space-separated postfix expression such as `3 4 2 * +`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate_postfix(&self, postfix: &str) -> Result<f64> {
        let rpn: RPNExpr = postfix.parse()?;
        self.evaluate_rpn(&rpn)
    }

    pub fn evaluate_rpn(&self, rpn: &RPNExpr) -> Result<f64> {
        Ok(RpnEvaluator::new(self.config.division).evaluate(rpn)?)
    }
}

/// [`Calculator::to_postfix`] with the default [`Config`].
pub fn to_postfix(expression: &str) -> Result<String> {
    Calculator::default().to_postfix(expression)
}

/// [`Calculator::evaluate`] with the default [`Config`].
pub fn evaluate(expression: &str) -> Result<f64> {
    Calculator::default().evaluate(expression)
}
