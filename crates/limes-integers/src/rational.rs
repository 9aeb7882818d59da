//! Arbitrary precision rational numbers.
//!
//! Series coefficients, exact radicands and the leading-coefficient ratios
//! of rational limits all live here.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;

use crate::{Integer, IntegerError};

/// An exact fraction, kept in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(pub(crate) RBig);

impl Rational {
    /// `numerator / denominator`, normalised.
    ///
    /// # Panics
    ///
    /// On a zero denominator; use [`Rational::try_new`] for untrusted input.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "zero denominator");
        Self::from_parts(numerator, &denominator)
    }

    /// Creates a new rational, failing on a zero denominator.
    ///
    /// # Errors
    ///
    /// Returns [`IntegerError::DivisionByZero`] if `denominator` is zero.
    pub fn try_new(numerator: Integer, denominator: Integer) -> Result<Self, IntegerError> {
        if denominator.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }
        Ok(Self::from_parts(numerator, &denominator))
    }

    fn from_parts(numerator: Integer, denominator: &Integer) -> Self {
        let numerator = if denominator.is_negative() {
            -numerator
        } else {
            numerator
        };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.as_inner().clone().unsigned_abs(),
        ))
    }

    /// Embeds an integer.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        n.into()
    }

    /// Shorthand for [`Rational::new`] on machine integers.
    ///
    /// # Panics
    ///
    /// On a zero denominator.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Signed numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Positive denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(IBig::from(self.0.denominator().clone()))
    }

    /// Whether the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// The value as an integer, if it is one.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numerator())
    }

    /// Returns the largest integer not above this value.
    #[must_use]
    pub fn floor(&self) -> Integer {
        let num = self.numerator();
        let den = self.denominator();
        let q = &num / &den;
        if num.is_negative() && !num.is_divisible_by(&den) {
            q - Integer::one()
        } else {
            q
        }
    }

    /// Magnitude.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// `1 / self`, or `None` for zero.
    #[must_use]
    pub fn checked_recip(&self) -> Option<Self> {
        (!self.is_zero()).then(|| Self(self.0.clone().inv()))
    }

    /// Sign as `-1`, `0` or `1`.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.numerator().signum()
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

    /// Unwraps the `RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Borrows the `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes self^exp for any exponent; `None` for a negative power of zero.
    #[must_use]
    pub fn powi(&self, exp: i64) -> Option<Self> {
        let magnitude = u32::try_from(exp.unsigned_abs()).ok()?;
        let p = self.pow(magnitude);
        if exp < 0 {
            p.checked_recip()
        } else {
            Some(p)
        }
    }

    /// Approximates the value as an `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let mut num = self.numerator();
        let mut den = self.denominator();
        // Keep both parts inside the f64 exponent range.
        let excess = num.bit_len().max(den.bit_len()).saturating_sub(1000);
        if excess > 0 {
            num = num.shift_right(excess);
            den = den.shift_right(excess);
        }
        num.to_f64() / den.to_f64()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational(RBig::ZERO)
    }
    fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational(RBig::ONE)
    }
    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rational").field(&format_args!("{self}")).finish()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.numerator(), f)?;
        if !self.is_integer() {
            write!(f, "/{}", self.denominator())?;
        }
        Ok(())
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Rational(RBig::from(n.0))
    }
}

impl From<&Integer> for Rational {
    fn from(n: &Integer) -> Self {
        Self::from_integer(n.clone())
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Integer::new(n).into()
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        i64::from(n).into()
    }
}
