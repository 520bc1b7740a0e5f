pub mod calculator;
pub mod config;
pub mod error;
pub mod ffi;
pub mod rpn_converter;
pub mod rpn_evaluator;
mod stack;
pub mod tokenizer;

pub use calculator::{evaluate, to_postfix, Calculator};
pub use config::{Config, DivisionPolicy};
pub use error::{Error, Result};
