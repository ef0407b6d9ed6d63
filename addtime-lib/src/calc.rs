use crate::evaluator::compute;
use crate::parser::{parse, ParseError};
use crate::quantum::{Qps, TimeValue};
use crate::tokenizer::tokenize;
use log::debug;
use serde::Serialize;

/// Answer shown in place of an expression that failed to parse.
pub const ERROR_SENTINEL: &str = "ERROR!";

/// Rendered answers, one per comma-separated expression, plus parse diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CalcOutput {
    pub answers: Vec<String>,
    pub errors: Vec<String>,
}

impl CalcOutput {
    pub fn from_values(values: &[Result<TimeValue, ParseError>]) -> Self {
        let mut output = CalcOutput::default();
        for value in values {
            match value {
                Ok(value) => output.answers.push(value.to_string()),
                Err(e) => {
                    output.answers.push(ERROR_SENTINEL.to_string());
                    output.errors.push(e.to_string());
                }
            }
        }
        output
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parses `input` and evaluates every expression in the `qps` base.
pub fn evaluate(input: &str, qps: Qps) -> Vec<Result<TimeValue, ParseError>> {
    let tokens = tokenize(input);
    debug!("{} token(s) in {:?}", tokens.len(), input);
    let parsed = parse(&tokens);
    compute(&parsed.exprs, qps)
}

/// Evaluates comma-separated duration expressions at `qps` quanta per second
/// and renders each result in the canonical `DdHHhMMmSSsMMM` form.
pub fn calc(input: &str, qps: Qps) -> CalcOutput {
    if input.trim().is_empty() {
        return CalcOutput::default();
    }
    CalcOutput::from_values(&evaluate(input, qps))
}
