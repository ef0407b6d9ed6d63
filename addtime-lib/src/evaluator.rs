use crate::parser::{ParseError, Slot};
use crate::quantum::{Qps, TimeValue};
use num_bigint::BigInt;

/// Sums the terms of every parsed slot in the `qps` base. Failed slots pass through.
pub fn compute(exprs: &[Slot], qps: Qps) -> Vec<Result<TimeValue, ParseError>> {
    exprs
        .iter()
        .map(|slot| match slot {
            Ok(terms) => Ok(sum_terms(terms, qps)),
            Err(e) => Err(e.clone()),
        })
        .collect()
}

/// Each millisecond term is converted to `qps` before summing, so the total is
/// a whole number of quanta: two 16 ms terms at 30 fps are zero frames, not one.
pub fn sum_terms(terms: &[BigInt], qps: Qps) -> TimeValue {
    let total = terms
        .iter()
        .map(|ms| TimeValue::ms(ms.clone()).to_quantum(qps).val)
        .sum::<BigInt>();
    TimeValue::new(total, qps)
}
