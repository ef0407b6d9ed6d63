//! Spreadsheet-style functions: `ADDTIME`, `SUBTIME` and `DIVTIME`.
//!
//! Every cell holds a single duration expression and all arithmetic happens in
//! the millisecond base.

use crate::evaluator::sum_terms;
use crate::formatter::stringify_ms;
use crate::parser::{parse, ParseError};
use crate::quantum::Qps;
use crate::tokenizer::tokenize;
use log::debug;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    Parse(ParseError),
    MultipleExpressions { cell: String, count: usize },
    Empty,
    DivisionByZero,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Parse(e) => write!(f, "{}", e),
            SheetError::MultipleExpressions { cell, count } => write!(
                f,
                "\"{}\" holds {} expressions, a cell takes exactly one",
                cell, count
            ),
            SheetError::Empty => write!(f, "a duration is required"),
            SheetError::DivisionByZero => write!(f, "cannot divide by a zero duration"),
        }
    }
}

impl Error for SheetError {}

impl From<ParseError> for SheetError {
    fn from(e: ParseError) -> Self {
        SheetError::Parse(e)
    }
}

/// Milliseconds of the single expression held by `cell`.
pub fn cell_millis(cell: &str) -> Result<BigInt, SheetError> {
    let mut slots = parse(&tokenize(cell)).exprs;
    if slots.len() > 1 {
        return Err(SheetError::MultipleExpressions {
            cell: cell.to_string(),
            count: slots.len(),
        });
    }
    match slots.pop() {
        Some(slot) => Ok(sum_terms(&slot?, Qps::MILLISECONDS).val),
        None => Err(SheetError::Empty),
    }
}

/// `ADDTIME(range)`: sum of every non-blank cell of a range, formatted.
pub fn add_time<R, C>(range: &[R]) -> Result<String, SheetError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut total = BigInt::zero();
    for cell in range.iter().flat_map(|row| row.as_ref()) {
        let cell = cell.as_ref();
        if cell.trim().is_empty() {
            continue;
        }
        total += cell_millis(cell)?;
    }
    debug!("ADDTIME = {} ms", total);
    Ok(stringify_ms(&total))
}

/// `SUBTIME(a, b)`: `a - b`, formatted.
pub fn sub_time(a: &str, b: &str) -> Result<String, SheetError> {
    let difference = cell_millis(a)? - cell_millis(b)?;
    Ok(stringify_ms(&difference))
}

/// `DIVTIME(a, b)`: how many times `b` fits in `a`, as a plain number.
pub fn div_time(a: &str, b: &str) -> Result<f64, SheetError> {
    let numerator = cell_millis(a)?;
    let denominator = cell_millis(b)?;
    if denominator.is_zero() {
        return Err(SheetError::DivisionByZero);
    }
    Ok(as_f64(&numerator) / as_f64(&denominator))
}

fn as_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_time() {
        assert_eq!(add_time(&[["1m20s", "2m40s"]]), Ok("04m00s".to_string()));
    }

    #[test]
    fn test_add_time_skips_blank_cells() {
        let range = vec![vec!["1h", ""], vec!["  ", "30m - 15m"]];
        assert_eq!(add_time(&range), Ok("01h15m00s".to_string()));
    }

    #[test]
    fn test_add_time_empty_range() {
        let range: Vec<Vec<&str>> = Vec::new();
        assert_eq!(add_time(&range), Ok("000".to_string()));
    }

    #[test]
    fn test_sub_time() {
        assert_eq!(sub_time("1m20s", "30s"), Ok("50s".to_string()));
        assert_eq!(sub_time("30s", "1m20s"), Ok("-50s".to_string()));
    }

    #[test]
    fn test_div_time() {
        assert_eq!(div_time("1m", "01m20s"), Ok(0.75));
        assert_eq!(div_time("1h", "15m"), Ok(4.0));
    }

    #[test]
    fn test_div_time_by_zero() {
        assert_eq!(div_time("1m", "0s"), Err(SheetError::DivisionByZero));
    }

    #[test]
    fn test_cell_with_several_expressions() {
        assert_eq!(
            sub_time("1m, 2m", "1s"),
            Err(SheetError::MultipleExpressions {
                cell: "1m, 2m".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_cell_parse_error() {
        let err = div_time("1x", "1s").unwrap_err();
        assert_eq!(
            err,
            SheetError::Parse(ParseError::InvalidNumberToken {
                token: "1x".to_string()
            })
        );
        assert_eq!(err.to_string(), "\"1x\" is not a valid time value");
    }

    #[test]
    fn test_empty_cell() {
        assert_eq!(sub_time("", "1s"), Err(SheetError::Empty));
    }
}
