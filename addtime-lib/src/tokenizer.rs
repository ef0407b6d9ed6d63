use once_cell::sync::Lazy;
use regex::Regex;

/// Operators, expression separator and unit letters each stand as their own token.
static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+\-,DdHhMmSs]").expect("delimiter pattern is valid"));

/// Splits `input` into tokens without validating anything.
///
/// Whitespace is not a delimiter: it is removed from each token after the
/// split, so `"1 2h"` yields `["12", "h"]`. Tokens left empty are dropped.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for delimiter in DELIMITER.find_iter(input) {
        pieces.push(&input[last..delimiter.start()]);
        pieces.push(delimiter.as_str());
        last = delimiter.end();
    }
    pieces.push(&input[last..]);

    pieces
        .into_iter()
        .map(|piece| piece.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}
