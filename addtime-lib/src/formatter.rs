use crate::unit::{DAY, HOUR, MINUTE, SECOND};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Renders a millisecond duration as `[-][Nd][HHh][MMm][SSs][mmm]`.
///
/// Once a segment is written every smaller hour/minute/second segment follows
/// it, even when zero. The millisecond remainder is only written when nonzero,
/// or when nothing else was, so zero renders as `"000"`.
pub fn stringify_ms(ms: &BigInt) -> String {
    let mut rest = ms.abs();
    let mut result = String::new();

    let day = BigInt::from(DAY);
    if rest >= day {
        let days = &rest / &day;
        rest -= &days * &day;
        result.push_str(&format!("{}d", days));
    }

    for (size, suffix) in [(HOUR, 'h'), (MINUTE, 'm'), (SECOND, 's')] {
        let size = BigInt::from(size);
        if rest >= size {
            let count = &rest / &size;
            rest -= &count * &size;
            result.push_str(&format!("{:0>2}{}", count.to_string(), suffix));
        } else if !result.is_empty() {
            result.push_str(&format!("00{}", suffix));
        }
    }

    if !rest.is_zero() || result.is_empty() {
        result.push_str(&format!("{:0>3}", rest.to_string()));
    }

    if ms.is_negative() {
        result.insert(0, '-');
    }
    result
}
