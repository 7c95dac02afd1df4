//! Best rational approximation of solver output.
//!
//! Solvers answer with floating-point numbers, while the bounds computed by
//! this crate are expected to be small rationals (halves, thirds, ...).
//! Each value is replaced by the closest rational with a bounded denominator.
//! A true optimum whose denominator exceeds the bound is reported wrongly.

use crate::error::Error;
use num::bigint::BigInt;
use num::rational::{BigRational, Ratio};
use num::{Integer, One, Signed, ToPrimitive, Zero};

/// Rationals used in reports.
pub type Rational = Ratio<i64>;

/// Default bound on the denominators of reported values.
pub const MAX_DENOMINATOR: i64 = 100;

/// Return the rational closest to `x` among those with a denominator
/// at most `max_denominator`.
///
/// The float is first converted exactly to a rational, which is then
/// approximated by its continued fraction expansion: the result is the
/// last convergent or semiconvergent with a small enough denominator.
/// A bound `max_denominator` below 1 is an error.
pub fn approximate(x: f64, max_denominator: i64) -> Result<Rational, Error> {
    if max_denominator < 1 {
        return Err(Error::InvalidDenominator(max_denominator));
    }
    let exact = BigRational::from_float(x).ok_or(Error::NotFinite(x))?;
    let max_den = BigInt::from(max_denominator);
    let res = if exact.denom() <= &max_den {
        exact
    } else {
        limit_denominator(&exact, &max_den)
    };
    match (res.numer().to_i64(), res.denom().to_i64()) {
        (Some(p), Some(q)) => Ok(Ratio::new(p, q)),
        _ => Err(Error::OutOfRange(x)),
    }
}

// Requires x.denom() > max_den, so that the expansion stops before
// reaching x itself.
fn limit_denominator(x: &BigRational, max_den: &BigInt) -> BigRational {
    // p0/q0 and p1/q1 are the two last convergents
    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let (mut n, mut d) = (x.numer().clone(), x.denom().clone());
    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_den {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }
    let k = (max_den - &q0).div_floor(&q1);
    let semiconvergent = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let convergent = BigRational::new(p1, q1);
    if (&convergent - x).abs() <= (&semiconvergent - x).abs() {
        convergent
    } else {
        semiconvergent
    }
}
