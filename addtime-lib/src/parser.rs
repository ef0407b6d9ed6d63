use crate::unit::Unit;
use log::{debug, trace};
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt;
use std::mem;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("number pattern is valid"));

/// Signed millisecond terms of one comma-separated expression.
pub type MsExpression = Vec<BigInt>;

/// One comma-separated expression, parsed or not.
pub type Slot = Result<MsExpression, ParseError>;

/// What the parser was waiting for when it hit an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Number,
    UnitOrDelimiter,
    DelimiterOrNumber,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Number => write!(f, "a number"),
            Expectation::UnitOrDelimiter => write!(f, "a unit or a delimiter"),
            Expectation::DelimiterOrNumber => write!(f, "a delimiter or a number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `+`, `-` or `,` where a number was expected.
    UnexpectedOperator { token: String },
    /// A unit letter out of turn, or anything but a unit or delimiter right after a number.
    UnexpectedUnitOrEnd { token: String, expected: Expectation },
    /// A token that should have been a run of digits.
    InvalidNumberToken { token: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedOperator { token } => write!(
                f,
                "Unexpected \"{}\", did you forget to put a time before?",
                token
            ),
            ParseError::UnexpectedUnitOrEnd { token, expected } => {
                write!(f, "Unexpected \"{}\", expecting {}", token, expected)
            }
            ParseError::InvalidNumberToken { token } => {
                write!(f, "\"{}\" is not a valid time value", token)
            }
        }
    }
}

impl Error for ParseError {}

/// Parser output: one slot per comma-separated expression, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parsed {
    pub exprs: Vec<Slot>,
}

impl Parsed {
    /// Diagnostics of the failed slots, in order.
    pub fn errors(&self) -> Vec<String> {
        self.exprs
            .iter()
            .filter_map(|slot| slot.as_ref().err())
            .map(|e| e.to_string())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.exprs.iter().any(Result::is_err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

enum Token<'t> {
    Comma,
    Operator(Sign),
    Unit(Unit),
    Other(&'t str),
}

impl<'t> Token<'t> {
    fn classify(token: &'t str) -> Token<'t> {
        match token {
            "," => Token::Comma,
            "+" => Token::Operator(Sign::Plus),
            "-" => Token::Operator(Sign::Minus),
            _ => Unit::from_token(token).map_or(Token::Other(token), Token::Unit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectNumber,
    ExpectUnitOrDelimiter,
    ExpectDelimiterOrNumber,
    /// Panic mode: tokens are dropped until the next `,`.
    Recovering,
}

impl State {
    fn expectation(self) -> Expectation {
        match self {
            State::ExpectNumber | State::Recovering => Expectation::Number,
            State::ExpectUnitOrDelimiter => Expectation::UnitOrDelimiter,
            State::ExpectDelimiterOrNumber => Expectation::DelimiterOrNumber,
        }
    }
}

struct Parser {
    state: State,
    /// Closed terms of the current expression.
    terms: MsExpression,
    /// Unit-converted sum of the open term.
    total: Option<BigInt>,
    /// Number read but not yet given a unit.
    pending: Option<BigInt>,
    /// Sign token read for the open term, if any.
    sign: Option<Sign>,
    slots: Vec<Slot>,
}

impl Parser {
    fn new() -> Self {
        Parser {
            state: State::ExpectNumber,
            terms: Vec::new(),
            total: None,
            pending: None,
            sign: None,
            slots: Vec::new(),
        }
    }

    fn step(&mut self, raw: &str) {
        trace!("{:?} <- {:?}", self.state, raw);
        let token = Token::classify(raw);

        if self.state == State::Recovering {
            if let Token::Comma = token {
                self.reset();
            }
            return;
        }

        match (self.state, token) {
            (State::ExpectNumber, Token::Comma) => {
                self.fail(ParseError::UnexpectedOperator {
                    token: ",".to_string(),
                });
                // the comma still ends the failed expression
                self.reset();
            }
            (_, Token::Comma) => {
                self.close_term();
                let terms = mem::take(&mut self.terms);
                self.slots.push(Ok(terms));
                self.reset();
            }
            (State::ExpectNumber, Token::Operator(sign)) => {
                if self.is_fresh() {
                    self.sign = Some(sign);
                } else {
                    self.fail(ParseError::UnexpectedOperator {
                        token: sign.to_string(),
                    });
                }
            }
            (_, Token::Operator(sign)) => {
                self.close_term();
                self.sign = Some(sign);
                self.state = State::ExpectNumber;
            }
            (State::ExpectUnitOrDelimiter, Token::Unit(unit)) => {
                let value = self.pending.take().unwrap_or_default();
                let total = self.total.take().unwrap_or_default();
                self.total = Some(total + value * BigInt::from(unit.millis()));
                self.state = State::ExpectDelimiterOrNumber;
            }
            (state, Token::Unit(_)) => {
                self.fail(ParseError::UnexpectedUnitOrEnd {
                    token: raw.to_string(),
                    expected: state.expectation(),
                });
            }
            (State::ExpectUnitOrDelimiter, Token::Other(token)) => {
                self.fail(ParseError::UnexpectedUnitOrEnd {
                    token: token.to_string(),
                    expected: Expectation::UnitOrDelimiter,
                });
            }
            (_, Token::Other(token)) => match parse_number(token) {
                Some(value) => {
                    self.pending = Some(value);
                    self.state = State::ExpectUnitOrDelimiter;
                }
                None => self.fail(ParseError::InvalidNumberToken {
                    token: token.to_string(),
                }),
            },
        }
    }

    fn finish(mut self) -> Parsed {
        let abandoned = self.state == State::Recovering
            || (self.state == State::ExpectNumber && self.is_fresh());
        if !abandoned {
            self.close_term();
            let terms = mem::take(&mut self.terms);
            self.slots.push(Ok(terms));
        }
        Parsed { exprs: self.slots }
    }

    /// Nothing has been read for the current expression yet.
    fn is_fresh(&self) -> bool {
        self.terms.is_empty()
            && self.total.is_none()
            && self.pending.is_none()
            && self.sign.is_none()
    }

    /// A trailing unitless number is a millisecond remainder of the term.
    fn close_term(&mut self) {
        let mut term = self.total.take().unwrap_or_default();
        if let Some(remainder) = self.pending.take() {
            term += remainder;
        }
        if self.sign.take() == Some(Sign::Minus) {
            term = -term;
        }
        self.terms.push(term);
    }

    fn fail(&mut self, error: ParseError) {
        debug!("parse error: {}", error);
        self.slots.push(Err(error));
        self.state = State::Recovering;
    }

    fn reset(&mut self) {
        self.terms.clear();
        self.total = None;
        self.pending = None;
        self.sign = None;
        self.state = State::ExpectNumber;
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

fn parse_number(token: &str) -> Option<BigInt> {
    if !NUMBER.is_match(token) {
        return None;
    }
    BigInt::parse_bytes(token.as_bytes(), 10)
}

/// Parses tokenized input into expression slots.
///
/// A malformed expression yields an error slot and the parser skips ahead to
/// the next `,`, so later expressions are still evaluated.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Parsed {
    let mut parser = Parser::new();
    for token in tokens {
        parser.step(token.as_ref());
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::unit::{DAY, HOUR, MINUTE, SECOND};

    fn parse_str(input: &str) -> Parsed {
        parse(&tokenize(input))
    }

    fn terms(values: &[i64]) -> Slot {
        Ok(values.iter().map(|v| BigInt::from(*v)).collect())
    }

    fn ms(value: u64) -> i64 {
        value as i64
    }

    #[test]
    fn test_parse_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(parse(&empty), Parsed::default());
    }

    #[test]
    fn test_parse_single_term() {
        assert_eq!(parse_str("30h").exprs, vec![terms(&[ms(30 * HOUR)])]);
    }

    #[test]
    fn test_parse_units_sum_into_one_term() {
        let parsed = parse_str("30h 12m + 2s300");
        assert_eq!(
            parsed.exprs,
            vec![terms(&[ms(30 * HOUR + 12 * MINUTE), ms(2 * SECOND + 300)])]
        );
        assert!(parsed.errors().is_empty());
    }

    #[test]
    fn test_parse_bare_number_is_milliseconds() {
        assert_eq!(parse_str("250").exprs, vec![terms(&[250])]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            parse_str("1D2H3M4S").exprs,
            vec![terms(&[ms(DAY + 2 * HOUR + 3 * MINUTE + 4 * SECOND)])]
        );
    }

    #[test]
    fn test_parse_negative_term() {
        assert_eq!(
            parse_str("1m - 1h").exprs,
            vec![terms(&[ms(MINUTE), -ms(HOUR)])]
        );
    }

    #[test]
    fn test_parse_sign_covers_whole_term() {
        assert_eq!(
            parse_str("-1h30m").exprs,
            vec![terms(&[-ms(HOUR + 30 * MINUTE)])]
        );
        assert_eq!(
            parse_str("2h - 1h30m + 10s").exprs,
            vec![terms(&[ms(2 * HOUR), -ms(HOUR + 30 * MINUTE), ms(10 * SECOND)])]
        );
    }

    #[test]
    fn test_parse_multiple_expressions() {
        let parsed = parse_str("1h, 2m, 3s");
        assert_eq!(
            parsed.exprs,
            vec![
                terms(&[ms(HOUR)]),
                terms(&[ms(2 * MINUTE)]),
                terms(&[ms(3 * SECOND)])
            ]
        );
    }

    #[test]
    fn test_parse_remainder_before_comma_is_kept() {
        assert_eq!(
            parse_str("300, 1s").exprs,
            vec![terms(&[300]), terms(&[ms(SECOND)])]
        );
    }

    #[test]
    fn test_parse_error_at_comma_keeps_next_expression() {
        let parsed = parse_str("1h +, 2m");
        assert_eq!(
            parsed.exprs,
            vec![
                Err(ParseError::UnexpectedOperator {
                    token: ",".to_string()
                }),
                terms(&[ms(2 * MINUTE)])
            ]
        );
        assert_eq!(parsed.errors().len(), 1);
    }

    #[test]
    fn test_parse_panic_mode_skips_to_next_comma() {
        let parsed = parse_str("1x + 2h, 3s");
        assert_eq!(
            parsed.exprs,
            vec![
                Err(ParseError::InvalidNumberToken {
                    token: "1x".to_string()
                }),
                terms(&[ms(3 * SECOND)])
            ]
        );
        assert_eq!(parsed.errors(), vec!["\"1x\" is not a valid time value"]);
    }

    #[test]
    fn test_parse_unit_without_number() {
        let parsed = parse_str("h");
        assert_eq!(
            parsed.exprs,
            vec![Err(ParseError::UnexpectedUnitOrEnd {
                token: "h".to_string(),
                expected: Expectation::Number
            })]
        );
        assert_eq!(parsed.errors(), vec!["Unexpected \"h\", expecting a number"]);
    }

    #[test]
    fn test_parse_two_units_in_a_row() {
        assert_eq!(
            parse_str("1hm, 5").exprs,
            vec![
                Err(ParseError::UnexpectedUnitOrEnd {
                    token: "m".to_string(),
                    expected: Expectation::DelimiterOrNumber
                }),
                terms(&[5])
            ]
        );
    }

    #[test]
    fn test_parse_other_token_after_number() {
        let tokens = ["1", "x"];
        assert_eq!(
            parse(&tokens).exprs,
            vec![Err(ParseError::UnexpectedUnitOrEnd {
                token: "x".to_string(),
                expected: Expectation::UnitOrDelimiter
            })]
        );
    }

    #[test]
    fn test_parse_double_operator() {
        let parsed = parse_str("1h +- 2m");
        assert_eq!(
            parsed.exprs,
            vec![Err(ParseError::UnexpectedOperator {
                token: "-".to_string()
            })]
        );
        assert_eq!(
            parsed.errors(),
            vec!["Unexpected \"-\", did you forget to put a time before?"]
        );
    }

    #[test]
    fn test_parse_double_leading_sign() {
        assert!(parse_str("--1h").has_errors());
    }

    #[test]
    fn test_parse_empty_expression_between_commas() {
        let parsed = parse_str("1h,,2m");
        assert_eq!(parsed.exprs.len(), 3);
        assert!(parsed.exprs[1].is_err());
        assert_eq!(parsed.exprs[2], terms(&[ms(2 * MINUTE)]));
    }

    #[test]
    fn test_parse_trailing_comma_adds_no_slot() {
        assert_eq!(parse_str("1h,").exprs, vec![terms(&[ms(HOUR)])]);
    }

    #[test]
    fn test_parse_trailing_operator_adds_zero_term() {
        assert_eq!(parse_str("1h +").exprs, vec![terms(&[ms(HOUR), 0])]);
    }

    #[test]
    fn test_parse_error_in_last_expression() {
        let parsed = parse_str("1h, abc");
        assert_eq!(parsed.exprs.len(), 2);
        assert_eq!(parsed.exprs[0], terms(&[ms(HOUR)]));
        assert!(parsed.exprs[1].is_err());
    }

    #[test]
    fn test_parse_huge_number() {
        let parsed = parse_str("123456789012345678901234567890");
        let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(parsed.exprs, vec![Ok(vec![expected])]);
    }
}
