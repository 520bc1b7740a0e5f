use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Config;

lazy_static! {
    /// Every operator or parenthesis gets padded with spaces before splitting.
    static ref SEPARATOR_PATTERN: Regex =
        Regex::new(r"([+\-*/^()])").expect("separator pattern is valid");
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("number pattern is valid");
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Plus,
    Minus,
    Mult,
    Div,
    Pow,
}

impl Op {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Op::Plus),
            "-" => Some(Op::Minus),
            "*" => Some(Op::Mult),
            "/" => Some(Op::Div),
            "^" => Some(Op::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Mult => '*',
            Op::Div => '/',
            Op::Pow => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Op::Pow => 3,
            Op::Mult | Op::Div => 2,
            Op::Plus | Op::Minus => 1,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token {
    Number(f64),
    Operator(Op),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(num) => write!(f, "{}", num),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerError {
    #[error("Invalid token: '{0}'")]
    InvalidToken(String),
    #[error("Expression is {len} bytes long, the limit is {limit}")]
    InputTooLong { len: usize, limit: usize },
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct TokenizedInput(pub Vec<Token>);

impl std::ops::Deref for TokenizedInput {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Digits with an optional decimal point, small enough to stay finite.
fn parse_number(literal: &str) -> Option<f64> {
    if !NUMBER_PATTERN.is_match(literal) {
        return None;
    }

    literal.parse().ok().filter(|num: &f64| num.is_finite())
}

/// Classifies one whitespace-free fragment. A `-` glued to a literal is its sign.
pub(crate) fn parse_token(fragment: &str) -> Result<Token, TokenizerError> {
    let number = match fragment.strip_prefix('-') {
        Some(magnitude) => parse_number(magnitude).map(|num| -num),
        None => parse_number(fragment),
    };

    match fragment {
        "(" => Ok(Token::LParen),
        ")" => Ok(Token::RParen),
        _ => Op::from_symbol(fragment)
            .map(Token::Operator)
            .or(number.map(Token::Number))
            .ok_or_else(|| TokenizerError::InvalidToken(fragment.to_string())),
    }
}

#[derive(Default)]
pub struct Tokenizer {
    prev: Option<Token>,
    max_input_len: Option<usize>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            prev: None,
            max_input_len: None,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            prev: None,
            max_input_len: config.max_input_len,
        }
    }

    /// A `-` here starts an operand rather than subtracting one.
    fn makes_unary(&self) -> bool {
        !matches!(self.prev, Some(Token::Number(_)) | Some(Token::RParen))
    }

    /// Splits `input` into tokens.
    ///
    /// A `-` in operand position (start of input, after `(` or after another
    /// operator) immediately followed by a number is folded into that number,
    /// so `-2^2` is `(-2)^2`.
    pub fn tokenize(&mut self, input: &str) -> Result<TokenizedInput, TokenizerError> {
        if let Some(limit) = self.max_input_len {
            if input.len() > limit {
                return Err(TokenizerError::InputTooLong {
                    len: input.len(),
                    limit,
                });
            }
        }

        self.prev = None;

        let spaced = SEPARATOR_PATTERN.replace_all(input, " ${1} ");
        let mut fragments = spaced.split_whitespace().peekable();
        let mut tokens = Vec::new();

        while let Some(fragment) = fragments.next() {
            let token = match fragment {
                "-" if self.makes_unary()
                    && fragments
                        .peek()
                        .is_some_and(|next| NUMBER_PATTERN.is_match(next)) =>
                {
                    let literal = fragments.next().unwrap_or_default();
                    parse_token(&format!("-{literal}"))?
                }
                _ => parse_token(fragment)?,
            };

            tokens.push(token);
            self.prev = Some(token);
        }

        Ok(TokenizedInput(tokens))
    }
}
