//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::Integer` with the
//! operations the limit and series engines need: exact arithmetic,
//! Euclidean division, fallible narrowing and a few classic sequences.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::IntegerError;

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig`. Values compare and hash by value, so two
/// integers built along different paths are interchangeable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(pub(crate) IBig);

impl Integer {
    /// Lifts a machine integer.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses digits in `radix`.
    ///
    /// # Errors
    ///
    /// Fails on an empty string or a digit outside the radix.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Magnitude.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Sign as `-1`, `0` or `1`.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match self.0.cmp(&IBig::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// `self < 0`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// `self > 0`.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Parity test.
    #[must_use]
    pub fn is_even(&self) -> bool {
        (&self.0 % IBig::from(2)).is_zero()
    }

    /// Negated [`Integer::is_even`].
    #[must_use]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// Bit length of the magnitude; zero for zero.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Non-negative greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Non-negative least common multiple; zero if either side is zero.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Truncating division with remainder, the remainder taking the sign of
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegerError::DivisionByZero`] if `divisor` is zero.
    pub fn divide_and_remainder(&self, divisor: &Self) -> Result<(Self, Self), IntegerError> {
        if divisor.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }
        Ok((Self(&self.0 / &divisor.0), Self(&self.0 % &divisor.0)))
    }

    /// Truncating quotient.
    ///
    /// # Errors
    ///
    /// Returns [`IntegerError::DivisionByZero`] if `divisor` is zero.
    pub fn quotient(&self, divisor: &Self) -> Result<Self, IntegerError> {
        self.divide_and_remainder(divisor).map(|(q, _)| q)
    }

    /// Euclidean residue in `0..|modulus|`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegerError::DivisionByZero`] if `modulus` is zero.
    pub fn modulo(&self, modulus: &Self) -> Result<Self, IntegerError> {
        let (_, r) = self.divide_and_remainder(modulus)?;
        if r.is_negative() {
            Ok(r + modulus.abs())
        } else {
            Ok(r)
        }
    }

    /// Returns true if `divisor` divides `self` exactly. Zero divides only zero.
    #[must_use]
    pub fn is_divisible_by(&self, divisor: &Self) -> bool {
        if divisor.is_zero() {
            return self.is_zero();
        }
        (&self.0 % &divisor.0).is_zero()
    }

    /// Unwraps the `IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Borrows the `IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Narrows to `i64`, or `None` when out of range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Approximates the value as an `f64`, saturating to infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse().unwrap_or(f64::NAN)
    }

    /// `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Shifts left by `bits`, multiplying by a power of two.
    #[must_use]
    pub fn shift_left(&self, bits: usize) -> Self {
        Self(&self.0 << bits)
    }

    /// Shifts right by `bits`, flooring.
    #[must_use]
    pub fn shift_right(&self, bits: usize) -> Self {
        Self(&self.0 >> bits)
    }

    /// The `n`-th Fibonacci number by the doubling identities.
    ///
    /// Negative indices follow `F(-n) = (-1)^(n+1) F(n)`.
    #[must_use]
    pub fn fibonacci(n: i64) -> Self {
        let m = n.unsigned_abs();
        let (mut a, mut b) = (Self::zero(), Self::one());
        for bit in (0..u64::BITS - m.leading_zeros()).rev() {
            // (F(k), F(k+1)) -> (F(2k), F(2k+1))
            let two_b_minus_a = b.shift_left(1) - &a;
            let c = &a * &two_b_minus_a;
            let d = &a * &a + &b * &b;
            if (m >> bit) & 1 == 1 {
                a = d.clone();
                b = c + d;
            } else {
                a = c;
                b = d;
            }
        }
        if n < 0 && m % 2 == 0 {
            -a
        } else {
            a
        }
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Integer(IBig::ZERO)
    }
    fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }
}

impl One for Integer {
    fn one() -> Self {
        Integer(IBig::ONE)
    }
    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Integer").field(&format_args!("{}", self.0)).finish()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Integer {
    type Err = dashu::base::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

macro_rules! impl_try_from_integer {
    ($($target:ty),*) => {
        $(
            impl TryFrom<&Integer> for $target {
                type Error = IntegerError;

                fn try_from(value: &Integer) -> Result<Self, Self::Error> {
                    value.0.clone().try_into().map_err(|_| IntegerError::OutOfRange {
                        value: value.to_string(),
                        target: stringify!($target),
                    })
                }
            }
        )*
    };
}

impl_try_from_integer!(i32, i64, u32, u64, usize);
