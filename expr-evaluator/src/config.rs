/// Default cap on the raw expression length, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 16 * 1024;

/// How the evaluator treats a zero divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionPolicy {
    /// Plain `f64` division: `1/0` is `inf`, `0/0` is `NaN`.
    #[default]
    Ieee,
    /// Fail with `EvaluatorError::DivisionByZero`.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Longest accepted input, `None` disables the check.
    pub max_input_len: Option<usize>,
    pub division: DivisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_len: Some(DEFAULT_MAX_INPUT_LEN),
            division: DivisionPolicy::default(),
        }
    }
}

impl Config {
    pub fn with_max_input_len(mut self, max_input_len: Option<usize>) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn with_division(mut self, division: DivisionPolicy) -> Self {
        self.division = division;
        self
    }
}
