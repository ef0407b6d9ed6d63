use crate::formatter::stringify_ms;
use num_bigint::BigInt;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Quanta per second of the millisecond base.
pub const MILLIS_PER_SECOND: u32 = 1_000;

/// How many time quanta make one second (30 for 30 fps video, 1000 for
/// milliseconds).
///
/// A quantum is never shorter than one millisecond, so the value is bounded to
/// `1..=1000`. Finer quanta could not be told apart once expressed in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Qps(u32);

impl Qps {
    pub const MILLISECONDS: Qps = Qps(MILLIS_PER_SECOND);
    pub const FPS_30: Qps = Qps(30);
    pub const FPS_60: Qps = Qps(60);

    pub fn new(value: u32) -> Option<Qps> {
        (1..=MILLIS_PER_SECOND)
            .contains(&value)
            .then_some(Qps(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Qps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQps(String);

impl fmt::Display for InvalidQps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid quantum per second \"{}\": expected an integer between 1 and {}",
            self.0, MILLIS_PER_SECOND
        )
    }
}

impl Error for InvalidQps {}

impl TryFrom<u32> for Qps {
    type Error = InvalidQps;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Qps::new(value).ok_or_else(|| InvalidQps(value.to_string()))
    }
}

impl From<Qps> for u32 {
    fn from(qps: Qps) -> Self {
        qps.0
    }
}

impl FromStr for Qps {
    type Err = InvalidQps;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Qps::new)
            .ok_or_else(|| InvalidQps(s.to_string()))
    }
}

/// An exact signed duration counted in `qps` quanta per second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
    pub val: BigInt,
    pub qps: Qps,
}

impl TimeValue {
    pub fn new(val: impl Into<BigInt>, qps: Qps) -> Self {
        TimeValue {
            val: val.into(),
            qps,
        }
    }

    /// A value in the millisecond base.
    pub fn ms(val: impl Into<BigInt>) -> Self {
        TimeValue::new(val, Qps::MILLISECONDS)
    }

    /// Nearest whole millisecond, half away from zero.
    pub fn to_milliseconds(&self) -> TimeValue {
        TimeValue::ms(quanta_to_ms(&self.val, self.qps))
    }

    /// Quantum count in `qps` whose millisecond value lies closest to this
    /// value. On an exact tie the higher count wins.
    pub fn to_quantum(&self, qps: Qps) -> TimeValue {
        let ms = quanta_to_ms(&self.val, self.qps);
        let mut lo = &ms * BigInt::from(qps.get()) / BigInt::from(MILLIS_PER_SECOND);
        let mut lo_ms = quanta_to_ms(&lo, qps);
        let hi;
        let hi_ms;
        if lo_ms <= ms {
            hi = &lo + BigInt::one();
            hi_ms = quanta_to_ms(&hi, qps);
        } else {
            // truncation overshot, step down
            hi_ms = lo_ms;
            hi = lo;
            lo = &hi - BigInt::one();
            lo_ms = quanta_to_ms(&lo, qps);
        }

        if &hi_ms - &ms > &ms - &lo_ms {
            TimeValue::new(lo, qps)
        } else {
            TimeValue::new(hi, qps)
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify_ms(&self.to_milliseconds().val))
    }
}

/// Works in tenths of a millisecond so that adding five tenths before the
/// final truncating division rounds half away from zero.
fn quanta_to_ms(count: &BigInt, qps: Qps) -> BigInt {
    let rounding = if count.is_negative() {
        BigInt::from(-5)
    } else {
        BigInt::from(5)
    };
    let tenths = count * BigInt::from(10 * MILLIS_PER_SECOND) / BigInt::from(qps.get());
    (tenths + rounding) / BigInt::from(10)
}
