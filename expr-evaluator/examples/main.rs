use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use expr_evaluator::{Calculator, Config, DivisionPolicy};

/// Evaluates arithmetic expressions (`+ - * / ^` and parentheses) by way of
/// their postfix form.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the postfix form instead of the value.
    #[arg(short, long)]
    postfix: bool,

    /// Reject expressions longer than this many bytes. 0 disables the limit.
    #[arg(long, default_value_t = expr_evaluator::config::DEFAULT_MAX_INPUT_LEN)]
    max_len: usize,

    /// Fail on division by zero instead of producing inf or NaN.
    #[arg(long)]
    strict_division: bool,

    /// Expression to evaluate. Read line by line from stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    expression: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        let division = if self.strict_division {
            DivisionPolicy::Error
        } else {
            DivisionPolicy::Ieee
        };

        Config::default()
            .with_max_input_len((self.max_len > 0).then_some(self.max_len))
            .with_division(division)
    }
}

/// Enable with `RUST_LOG=expr_evaluator=debug` or `RUST_LOG=expr_evaluator=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(calculator: &Calculator, postfix: bool, expression: &str) -> expr_evaluator::Result<String> {
    if postfix {
        calculator.to_postfix(expression)
    } else {
        calculator.evaluate(expression).map(|value| value.to_string())
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let calculator = Calculator::new(args.config());

    if let Some(expression) = &args.expression {
        return match run(&calculator, args.postfix, expression) {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut status = ExitCode::SUCCESS;
    let stdout = io::stdout();
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read the input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match run(&calculator, args.postfix, &line) {
            Ok(output) => {
                let mut out = stdout.lock();
                if writeln!(out, "{}", output).and_then(|_| out.flush()).is_err() {
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                status = ExitCode::FAILURE;
            }
        }
    }

    status
}
