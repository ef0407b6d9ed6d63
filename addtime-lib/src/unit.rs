/// Milliseconds in one second.
pub const SECOND: u64 = 1_000;
pub const MINUTE: u64 = 60 * SECOND;
pub const HOUR: u64 = 60 * MINUTE;
pub const DAY: u64 = 24 * HOUR;

/// Unit letter accepted after a number in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// Unit letters are case-insensitive: `d`, `H`, `m`, `S`...
    pub fn from_token(token: &str) -> Option<Unit> {
        match token {
            "D" | "d" => Some(Unit::Day),
            "H" | "h" => Some(Unit::Hour),
            "M" | "m" => Some(Unit::Minute),
            "S" | "s" => Some(Unit::Second),
            _ => None,
        }
    }

    pub fn millis(self) -> u64 {
        match self {
            Unit::Day => DAY,
            Unit::Hour => HOUR,
            Unit::Minute => MINUTE,
            Unit::Second => SECOND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_token_is_case_insensitive() {
        assert_eq!(Unit::from_token("d"), Some(Unit::Day));
        assert_eq!(Unit::from_token("D"), Some(Unit::Day));
        assert_eq!(Unit::from_token("H"), Some(Unit::Hour));
        assert_eq!(Unit::from_token("m"), Some(Unit::Minute));
        assert_eq!(Unit::from_token("S"), Some(Unit::Second));
        assert_eq!(Unit::from_token("w"), None);
        assert_eq!(Unit::from_token("hm"), None);
    }

    #[test]
    fn test_unit_millis() {
        assert_eq!(Unit::Second.millis(), 1_000);
        assert_eq!(Unit::Minute.millis(), 60_000);
        assert_eq!(Unit::Hour.millis(), 3_600_000);
        assert_eq!(Unit::Day.millis(), 86_400_000);
    }
}
